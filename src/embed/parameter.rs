//! Embedded parameters of methods and indexers.

use std::{fmt, sync::Arc};

use crate::{
    embed::{
        binding::{EmbeddingBinding, ParameterSymbol},
        copier,
        diagnostics::DiagnosticBag,
        lazy::PublishOnce,
        types::EmbeddedType,
    },
    metadata::{
        constant::ConstantValue, customattributes::SynthesizedAttribute,
        flags::ParamAttributes, marshalling::MarshallingInfo,
    },
    Result,
};

/// A parameter of an embedded method or property
pub struct EmbeddedParameter<B: EmbeddingBinding> {
    symbol: Arc<B::Parameter>,
    containing_type: Arc<EmbeddedType<B>>,
    attributes: PublishOnce<Vec<SynthesizedAttribute>>,
}

impl<B: EmbeddingBinding> EmbeddedParameter<B> {
    pub(crate) fn new(containing_type: Arc<EmbeddedType<B>>, symbol: Arc<B::Parameter>) -> Self {
        EmbeddedParameter {
            symbol,
            containing_type,
            attributes: PublishOnce::new(),
        }
    }

    /// The underlying parameter symbol
    pub fn symbol(&self) -> &Arc<B::Parameter> {
        &self.symbol
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    /// Zero-based position in the signature
    pub fn index(&self) -> u16 {
        self.symbol.ordinal()
    }

    /// Raw `ParamAttributes`
    pub fn flags(&self) -> u32 {
        self.symbol.flags()
    }

    /// Returns true for `[In]` parameters
    pub fn is_in(&self) -> bool {
        self.flags() & ParamAttributes::IN != 0
    }

    /// Returns true for `[Out]` parameters
    pub fn is_out(&self) -> bool {
        self.flags() & ParamAttributes::OUT != 0
    }

    /// Returns true for `[Optional]` parameters
    pub fn is_optional(&self) -> bool {
        self.flags() & ParamAttributes::OPTIONAL != 0
    }

    /// Declared type
    pub fn parameter_type(&self) -> B::TypeRef {
        self.symbol.parameter_type()
    }

    /// Custom modifiers on the `ref` of a by-ref parameter
    pub fn ref_custom_modifiers(&self) -> Vec<B::TypeRef> {
        self.symbol.ref_custom_modifiers()
    }

    /// Returns true for by-ref parameters
    pub fn is_by_reference(&self) -> bool {
        self.symbol.is_by_reference()
    }

    /// Returns true if the parameter has a default value
    pub fn has_default_value(&self) -> bool {
        self.symbol.default_value().is_some()
    }

    /// Default value of an optional parameter
    pub fn default_value(&self) -> Option<ConstantValue> {
        self.symbol.default_value()
    }

    /// Returns true if the parameter carries an explicit marshalling descriptor
    pub fn is_marshalled_explicitly(&self) -> bool {
        self.symbol.marshalling().is_some()
    }

    /// Explicit marshalling descriptor
    pub fn marshalling_information(&self) -> Option<MarshallingInfo> {
        self.symbol.marshalling()
    }

    /// Custom attributes of the embedded parameter, computed on first access
    ///
    /// # Errors
    /// Returns [`crate::Error::ManagerReleased`] if the manager has been dropped.
    pub fn attributes(&self, diagnostics: &DiagnosticBag) -> Result<&[SynthesizedAttribute]> {
        if let Some(attributes) = self.attributes.get() {
            return Ok(attributes);
        }

        let manager = self.containing_type.manager()?;
        let (attributes, published) = self.attributes.get_or_publish(|local| {
            copier::parameter_attributes(
                manager.binding(),
                &self.symbol.attributes(),
                &self.symbol.location(),
                local,
            )
        });
        if let Some(local) = published {
            manager.forward(&local, diagnostics);
        }
        Ok(attributes)
    }
}

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedParameter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedParameter")
            .field("name", &self.name())
            .field("index", &self.index())
            .finish()
    }
}

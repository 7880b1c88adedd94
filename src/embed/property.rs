//! Embedded properties.

use std::{fmt, sync::Arc};

use crate::{
    embed::{
        binding::{EmbeddingBinding, PropertySymbol},
        copier,
        diagnostics::DiagnosticBag,
        member::EmbeddedMember,
        method::EmbeddedMethod,
        parameter::EmbeddedParameter,
        types::EmbeddedType,
    },
    metadata::{
        constant::ConstantValue,
        customattributes::SynthesizedAttribute,
        flags::{CallingConvention, PropertyAttributes, Visibility},
    },
    Result,
};

/// A property of an embedded type
///
/// A property is embedded together with its accessors; the containing type is the one of
/// whichever accessor exists, the getter first.
pub struct EmbeddedProperty<B: EmbeddingBinding> {
    member: EmbeddedMember<B, B::Property>,
    getter: Option<Arc<EmbeddedMethod<B>>>,
    setter: Option<Arc<EmbeddedMethod<B>>>,
    parameters: Vec<EmbeddedParameter<B>>,
}

impl<B: EmbeddingBinding> EmbeddedProperty<B> {
    /// # Errors
    /// Returns [`crate::Error::Unreachable`] if neither accessor is given.
    pub(crate) fn new(
        symbol: Arc<B::Property>,
        getter: Option<Arc<EmbeddedMethod<B>>>,
        setter: Option<Arc<EmbeddedMethod<B>>>,
    ) -> Result<Self> {
        let containing_type = match getter.as_ref().or(setter.as_ref()) {
            Some(accessor) => accessor.containing_type().clone(),
            None => {
                return Err(unreachable_error!(
                    "Property {} has neither getter nor setter",
                    symbol.name()
                ))
            }
        };

        let parameters = symbol
            .parameters()
            .into_iter()
            .map(|parameter| EmbeddedParameter::new(containing_type.clone(), parameter))
            .collect();

        Ok(EmbeddedProperty {
            member: EmbeddedMember::new(symbol, containing_type),
            getter,
            setter,
            parameters,
        })
    }

    /// The underlying property symbol
    pub fn symbol(&self) -> &Arc<B::Property> {
        self.member.symbol()
    }

    /// The embedded type declaring this property
    pub fn containing_type(&self) -> &Arc<EmbeddedType<B>> {
        self.member.containing_type()
    }

    /// Property name
    pub fn name(&self) -> &str {
        self.symbol().name()
    }

    /// Raw `PropertyAttributes`
    pub fn flags(&self) -> u32 {
        self.symbol().flags()
    }

    /// Returns true for special-name properties
    pub fn is_special_name(&self) -> bool {
        self.flags() & PropertyAttributes::SPECIAL_NAME != 0
    }

    /// Returns true for runtime special-name properties
    pub fn is_rt_special_name(&self) -> bool {
        self.flags() & PropertyAttributes::RT_SPECIAL_NAME != 0
    }

    /// Declared type
    pub fn property_type(&self) -> B::TypeRef {
        self.symbol().property_type()
    }

    /// Embedded get accessor
    pub fn getter(&self) -> Option<&Arc<EmbeddedMethod<B>>> {
        self.getter.as_ref()
    }

    /// Embedded set accessor
    pub fn setter(&self) -> Option<&Arc<EmbeddedMethod<B>>> {
        self.setter.as_ref()
    }

    /// All embedded accessors, getter first
    pub fn accessors(&self) -> impl Iterator<Item = &Arc<EmbeddedMethod<B>>> {
        self.getter.iter().chain(self.setter.iter())
    }

    /// Indexer parameters
    pub fn parameters(&self) -> &[EmbeddedParameter<B>] {
        &self.parameters
    }

    /// Returns true if the accessors are static
    pub fn is_static(&self) -> bool {
        self.accessors().all(|accessor| accessor.is_static())
    }

    /// Property signature calling convention
    pub fn calling_convention(&self) -> CallingConvention {
        if self.is_static() {
            CallingConvention::PROPERTY
        } else {
            CallingConvention::PROPERTY | CallingConvention::HAS_THIS
        }
    }

    /// Accessibility of the property, the widest of its accessors
    pub fn visibility(&self) -> Visibility {
        self.accessors()
            .map(|accessor| accessor.visibility())
            .fold(Visibility::CompilerControlled, Visibility::widest)
    }

    /// Default value
    pub fn constant(&self) -> Option<ConstantValue> {
        self.symbol().constant()
    }

    /// Custom attributes of the embedded property, computed on first access
    ///
    /// # Errors
    /// Returns [`crate::Error::ManagerReleased`] if the manager has been dropped.
    pub fn attributes(&self, diagnostics: &DiagnosticBag) -> Result<&[SynthesizedAttribute]> {
        let symbol = self.symbol();
        self.member.attributes_with(diagnostics, |manager, local| {
            copier::member_attributes(
                manager.binding(),
                &symbol.attributes(),
                &symbol.location(),
                local,
            )
        })
    }
}

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedProperty<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedProperty")
            .field("name", &self.name())
            .field("getter", &self.getter.as_ref().map(|m| m.name().to_string()))
            .field("setter", &self.setter.as_ref().map(|m| m.name().to_string()))
            .finish()
    }
}

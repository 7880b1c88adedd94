//! Embedded type parameters of generic methods.
//!
//! Embeddable types are never generic themselves, so only method type parameters exist here.

use std::{fmt, sync::Arc};

use crate::{
    embed::binding::{EmbeddingBinding, TypeParameterSymbol},
    metadata::{customattributes::SynthesizedAttribute, flags::GenericParamAttributes},
};

/// A type parameter of an embedded method
pub struct EmbeddedTypeParameter<B: EmbeddingBinding> {
    symbol: Arc<B::TypeParameter>,
}

impl<B: EmbeddingBinding> EmbeddedTypeParameter<B> {
    pub(crate) fn new(symbol: Arc<B::TypeParameter>) -> Self {
        EmbeddedTypeParameter { symbol }
    }

    /// The underlying type parameter symbol
    pub fn symbol(&self) -> &Arc<B::TypeParameter> {
        &self.symbol
    }

    /// Type parameter name
    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    /// Zero-based position in the type parameter list
    pub fn index(&self) -> u16 {
        self.symbol.ordinal()
    }

    /// Type constraints
    pub fn constraints(&self) -> Vec<B::TypeRef> {
        self.symbol.constraints()
    }

    /// Method type parameters are never variant
    pub fn variance(&self) -> u32 {
        0
    }

    /// `class` constraint
    pub fn must_be_reference_type(&self) -> bool {
        self.symbol.has_reference_type_constraint()
    }

    /// `struct` constraint
    pub fn must_be_value_type(&self) -> bool {
        self.symbol.has_value_type_constraint()
    }

    /// `new()` constraint
    pub fn must_have_default_constructor(&self) -> bool {
        self.symbol.has_constructor_constraint()
    }

    /// Raw `GenericParamAttributes`
    pub fn flags(&self) -> u32 {
        let mut flags = self.variance();
        if self.must_be_reference_type() {
            flags |= GenericParamAttributes::REFERENCE_TYPE_CONSTRAINT;
        }
        if self.must_be_value_type() {
            flags |= GenericParamAttributes::NOT_NULLABLE_VALUE_TYPE_CONSTRAINT;
        }
        if self.must_have_default_constructor() {
            flags |= GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT;
        }
        flags
    }

    /// Custom attributes; type parameters of embedded methods never carry any
    pub fn attributes(&self) -> &[SynthesizedAttribute] {
        &[]
    }
}

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedTypeParameter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedTypeParameter")
            .field("name", &self.name())
            .field("index", &self.index())
            .finish()
    }
}

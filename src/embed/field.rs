//! Embedded fields.

use std::{fmt, sync::Arc};

use crate::{
    embed::{
        binding::{EmbeddingBinding, FieldSymbol},
        copier,
        diagnostics::DiagnosticBag,
        member::EmbeddedMember,
        types::EmbeddedType,
    },
    metadata::{
        constant::ConstantValue,
        customattributes::SynthesizedAttribute,
        flags::{FieldAttributes, Visibility},
        marshalling::MarshallingInfo,
    },
    Result,
};

/// A field of an embedded type
///
/// Enum members and the fields of COM structs are embedded with their constant, layout offset
/// and marshalling descriptor, since the runtime unifies the local copy with the original only
/// if the layouts agree.
pub struct EmbeddedField<B: EmbeddingBinding> {
    member: EmbeddedMember<B, B::Field>,
}

impl<B: EmbeddingBinding> EmbeddedField<B> {
    pub(crate) fn new(containing_type: Arc<EmbeddedType<B>>, symbol: Arc<B::Field>) -> Self {
        EmbeddedField {
            member: EmbeddedMember::new(symbol, containing_type),
        }
    }

    /// The underlying field symbol
    pub fn symbol(&self) -> &Arc<B::Field> {
        self.member.symbol()
    }

    /// The embedded type declaring this field
    pub fn containing_type(&self) -> &Arc<EmbeddedType<B>> {
        self.member.containing_type()
    }

    /// Field name
    pub fn name(&self) -> &str {
        self.symbol().name()
    }

    /// Raw `FieldAttributes`
    pub fn flags(&self) -> u32 {
        self.symbol().flags()
    }

    /// Accessibility of the field
    pub fn visibility(&self) -> Visibility {
        Visibility::from_member_access(self.flags())
    }

    /// Returns true for static fields
    pub fn is_static(&self) -> bool {
        self.flags() & FieldAttributes::STATIC != 0
    }

    /// Returns true for literal (constant) fields
    pub fn is_literal(&self) -> bool {
        self.flags() & FieldAttributes::LITERAL != 0
    }

    /// Returns true for read-only fields
    pub fn is_read_only(&self) -> bool {
        self.flags() & FieldAttributes::INIT_ONLY != 0
    }

    /// Declared type
    pub fn field_type(&self) -> B::TypeRef {
        self.symbol().field_type()
    }

    /// Custom modifiers on the `ref` of a ref field
    pub fn ref_custom_modifiers(&self) -> Vec<B::TypeRef> {
        self.symbol().ref_custom_modifiers()
    }

    /// Returns true for ref fields
    pub fn is_by_reference(&self) -> bool {
        self.symbol().is_by_reference()
    }

    /// Literal value
    pub fn constant(&self) -> Option<ConstantValue> {
        self.symbol().constant()
    }

    /// Returns true if the field carries an explicit marshalling descriptor
    pub fn is_marshalled_explicitly(&self) -> bool {
        self.symbol().marshalling().is_some()
    }

    /// Explicit marshalling descriptor
    pub fn marshalling_information(&self) -> Option<MarshallingInfo> {
        self.symbol().marshalling()
    }

    /// Encoded marshalling descriptor, empty if the field is not marshalled explicitly
    pub fn marshalling_descriptor(&self) -> Vec<u8> {
        self.symbol()
            .marshalling()
            .map(|info| info.descriptor().to_vec())
            .unwrap_or_default()
    }

    /// Explicit layout offset, 0 if the field has none
    pub fn offset(&self) -> u32 {
        self.symbol().offset().unwrap_or(0)
    }

    /// Custom attributes of the embedded field, computed on first access
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

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedField<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedField")
            .field("name", &self.name())
            .field("member", &self.member)
            .finish()
    }
}

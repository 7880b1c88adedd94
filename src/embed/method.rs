//! Embedded methods and the placeholder body handed out for them.

use std::{fmt, sync::Arc};

use crate::{
    embed::{
        binding::{EmbeddingBinding, MethodSymbol, TypeSymbol},
        copier,
        diagnostics::DiagnosticBag,
        member::EmbeddedMember,
        parameter::EmbeddedParameter,
        typeparam::EmbeddedTypeParameter,
        types::EmbeddedType,
    },
    metadata::{
        customattributes::SynthesizedAttribute,
        flags::{
            CallingConvention, MethodImplCodeType, MethodImplOptions, MethodModifiers,
            MethodVtableFlags, Visibility,
        },
        marshalling::MarshallingInfo,
    },
    Result,
};

/// Method body of an embedded method.
///
/// Embedded methods never have a real body. If the emission pipeline nevertheless asks for
/// one, an error has already been reported elsewhere and this empty body keeps emission going.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyBody;

impl EmptyBody {
    /// IL code bytes
    pub fn il(&self) -> &'static [u8] {
        &[]
    }

    /// Maximum evaluation stack depth
    pub fn max_stack(&self) -> u16 {
        0
    }

    /// Number of local variables
    pub fn local_count(&self) -> usize {
        0
    }

    /// Returns true if locals are zero-initialized
    pub fn locals_initialized(&self) -> bool {
        false
    }

    /// Number of exception handling regions
    pub fn exception_region_count(&self) -> usize {
        0
    }
}

/// A method of an embedded type
///
/// Parameters and type parameters are built once, when the method is embedded. The attribute
/// set is computed on first access.
pub struct EmbeddedMethod<B: EmbeddingBinding> {
    member: EmbeddedMember<B, B::Method>,
    parameters: Vec<EmbeddedParameter<B>>,
    type_parameters: Vec<EmbeddedTypeParameter<B>>,
}

impl<B: EmbeddingBinding> EmbeddedMethod<B> {
    pub(crate) fn new(containing_type: Arc<EmbeddedType<B>>, symbol: Arc<B::Method>) -> Self {
        let parameters = symbol
            .parameters()
            .into_iter()
            .map(|parameter| EmbeddedParameter::new(containing_type.clone(), parameter))
            .collect();
        let type_parameters = symbol
            .type_parameters()
            .into_iter()
            .map(EmbeddedTypeParameter::new)
            .collect();

        EmbeddedMethod {
            member: EmbeddedMember::new(symbol, containing_type),
            parameters,
            type_parameters,
        }
    }

    /// The underlying method symbol
    pub fn symbol(&self) -> &Arc<B::Method> {
        self.member.symbol()
    }

    /// The embedded type declaring this method
    pub fn containing_type(&self) -> &Arc<EmbeddedType<B>> {
        self.member.containing_type()
    }

    /// Method name
    pub fn name(&self) -> &str {
        self.symbol().name()
    }

    /// Raw `MethodAttributes`
    pub fn flags(&self) -> u32 {
        self.symbol().flags()
    }

    /// Raw `MethodImplAttributes`
    pub fn impl_flags(&self) -> u32 {
        self.symbol().impl_flags()
    }

    /// Accessibility of the method
    pub fn visibility(&self) -> Visibility {
        Visibility::from_member_access(self.flags())
    }

    /// Method modifiers (static, virtual, abstract, ...)
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags())
    }

    /// Returns true for static methods
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Returns true for virtual methods
    pub fn is_virtual(&self) -> bool {
        self.modifiers().contains(MethodModifiers::VIRTUAL)
    }

    /// Returns true for abstract methods
    pub fn is_abstract(&self) -> bool {
        self.modifiers().contains(MethodModifiers::ABSTRACT)
    }

    /// Returns true for sealed virtual methods
    pub fn is_sealed(&self) -> bool {
        self.modifiers().contains(MethodModifiers::FINAL)
    }

    /// Returns true if the method takes a new vtable slot
    pub fn is_new_slot(&self) -> bool {
        MethodVtableFlags::from_method_flags(self.flags()).contains(MethodVtableFlags::NEW_SLOT)
    }

    /// Returns true for special-name methods (accessors, operators)
    pub fn is_special_name(&self) -> bool {
        self.modifiers().contains(MethodModifiers::SPECIAL_NAME)
    }

    /// Returns true for P/Invoke methods
    pub fn is_platform_invoke(&self) -> bool {
        self.modifiers().contains(MethodModifiers::PINVOKE_IMPL)
    }

    /// Returns true if the implementation is provided by the runtime
    pub fn is_runtime_implemented(&self) -> bool {
        MethodImplCodeType::from_impl_flags(self.impl_flags()) == MethodImplCodeType::RUNTIME
    }

    /// Returns true for internal calls into the runtime
    pub fn is_runtime_internal(&self) -> bool {
        MethodImplOptions::from_impl_flags(self.impl_flags())
            .contains(MethodImplOptions::INTERNAL_CALL)
    }

    /// Returns true if the signature must be preserved as declared
    pub fn preserve_signature(&self) -> bool {
        MethodImplOptions::from_impl_flags(self.impl_flags())
            .contains(MethodImplOptions::PRESERVE_SIG)
    }

    /// Signature calling convention
    pub fn calling_convention(&self) -> CallingConvention {
        self.symbol().calling_convention()
    }

    /// Return type, `None` for `void`
    pub fn return_type(&self) -> Option<B::TypeRef> {
        self.symbol().return_type()
    }

    /// Marshalling descriptor of the return value
    pub fn return_marshalling(&self) -> Option<MarshallingInfo> {
        self.symbol().return_marshalling()
    }

    /// Parameters, in signature order
    pub fn parameters(&self) -> &[EmbeddedParameter<B>] {
        &self.parameters
    }

    /// Type parameters
    pub fn type_parameters(&self) -> &[EmbeddedTypeParameter<B>] {
        &self.type_parameters
    }

    /// Number of type parameters
    pub fn generic_parameter_count(&self) -> usize {
        self.type_parameters.len()
    }

    /// Returns true if emission expects a body for this method
    pub fn has_body(&self) -> bool {
        !(self.is_abstract()
            || self.is_runtime_implemented()
            || self.is_runtime_internal()
            || self.is_platform_invoke()
            || self.containing_type().symbol().is_com_import())
    }

    /// The body to emit, `None` for methods without a body
    pub fn body(&self) -> Option<EmptyBody> {
        self.has_body().then_some(EmptyBody)
    }

    /// Custom attributes of the embedded method, computed on first access
    ///
    /// # Errors
    /// Returns [`crate::Error::ManagerReleased`] if the manager has been dropped.
    pub fn attributes(&self, diagnostics: &DiagnosticBag) -> Result<&[SynthesizedAttribute]> {
        let symbol = self.symbol();
        self.member.attributes_with(diagnostics, |manager, local| {
            copier::method_attributes(
                manager.binding(),
                &symbol.attributes(),
                &symbol.location(),
                local,
            )
        })
    }
}

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedMethod<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedMethod")
            .field("name", &self.name())
            .field("parameters", &self.parameters)
            .field("member", &self.member)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        let body = EmptyBody;
        assert!(body.il().is_empty());
        assert_eq!(body.max_stack(), 0);
        assert_eq!(body.local_count(), 0);
        assert_eq!(body.exception_region_count(), 0);
        assert!(!body.locals_initialized());
        assert_eq!(body, EmptyBody::default());
    }
}

//! Metadata flag vocabularies used by embedded definitions.
//!
//! Symbols handed to the embedding layer describe themselves with the raw ECMA-335 flag
//! words they would carry in a metadata table. Embedded definitions answer the questions a
//! metadata writer asks (is it static, is it a COM object, which vtable layout) by masking
//! those words, so the constants below follow the table definitions of ECMA-335 II.23.1.
//!
//! # Key Types
//! - [`TypeAttributes`], [`FieldAttributes`], [`ParamAttributes`], [`PropertyAttributes`],
//!   [`EventAttributes`], [`GenericParamAttributes`]: flag constant modules
//! - [`MethodAccessFlags`], [`MethodModifiers`], [`MethodVtableFlags`],
//!   [`MethodImplCodeType`], [`MethodImplOptions`]: method flags split into logical groups
//! - [`CallingConvention`]: signature calling convention byte
//! - [`Visibility`]: member visibility as seen by a metadata writer

use bitflags::bitflags;
use strum::{Display, EnumIter};

#[allow(non_snake_case)]
/// All possible flags for `TypeAttributes`, §II.23.1.15
pub mod TypeAttributes {
    /// Use this mask to retrieve visibility information. These 3 bits contain one of the following values:
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Class has no public scope
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Class has public scope
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Class is nested with public visibility
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Use this mask to retrieve class layout information
    pub const LAYOUT_MASK: u32 = 0x0000_0018;
    /// Class fields are auto-laid out
    pub const AUTO_LAYOUT: u32 = 0x0000_0000;
    /// Class fields are laid out sequentially
    pub const SEQUENTIAL_LAYOUT: u32 = 0x0000_0008;
    /// Layout is supplied explicitly
    pub const EXPLICIT_LAYOUT: u32 = 0x0000_0010;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Class is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Class cannot be extended
    pub const SEALED: u32 = 0x0000_0100;
    /// Class name is special
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
    /// Runtime should check name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0000_0800;
    /// Class/Interface is imported (COM import)
    pub const IMPORT: u32 = 0x0000_1000;
    /// Reserved (Class is serializable)
    pub const SERIALIZABLE: u32 = 0x0000_2000;
    /// Type is a Windows Runtime type
    pub const WINDOWS_RUNTIME: u32 = 0x0000_4000;
    /// Use this mask to retrieve string information for native interop
    pub const STRING_FORMAT_MASK: u32 = 0x0003_0000;
    /// LPSTR is interpreted as ANSI
    pub const ANSI_CLASS: u32 = 0x0000_0000;
    /// LPSTR is interpreted as Unicode
    pub const UNICODE_CLASS: u32 = 0x0001_0000;
    /// LPSTR is interpreted automatically
    pub const AUTO_CLASS: u32 = 0x0002_0000;
    /// A non-standard encoding specified by `CUSTOM_STRING_FORMAT_MASK`
    pub const CUSTOM_FORMAT_CLASS: u32 = 0x0003_0000;
    /// Type has security associated with it
    pub const HAS_SECURITY: u32 = 0x0004_0000;
    /// Initialize the class before first static field access
    pub const BEFORE_FIELD_INIT: u32 = 0x0010_0000;
}

#[allow(non_snake_case)]
/// All possible flags for `FieldAttributes`, §II.23.1.5
pub mod FieldAttributes {
    /// These 3 bits contain one of the following values:
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Member not referenceable
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessible by sub-types only in this Assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Accessibly by anyone in the Assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessibly by sub-types anywhere, plus anyone in assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Accessibly by anyone who has visibility to this scope field contract attributes
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written to after init
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Reserved (to indicate this field should not be serialized when type is remoted)
    pub const NOT_SERIALIZED: u32 = 0x0080;
    /// Field is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// CLI provides 'special' behavior, depending upon the name of the field
    pub const RTSPECIAL_NAME: u32 = 0x0400;
    /// Field has marshalling information
    pub const HAS_FIELD_MARSHAL: u32 = 0x1000;
}

#[allow(non_snake_case)]
/// All possible flags for `ParamAttributes`, §II.23.1.13
pub mod ParamAttributes {
    /// Param is `In`
    pub const IN: u32 = 0x0001;
    /// Param is `out`
    pub const OUT: u32 = 0x0002;
    /// Param is optional
    pub const OPTIONAL: u32 = 0x0010;
    /// Param has default value
    pub const HAS_DEFAULT: u32 = 0x1000;
    /// Param has `FieldMarshal`
    pub const HAS_FIELD_MARSHAL: u32 = 0x2000;
}

#[allow(non_snake_case)]
/// All possible flags for `PropertyAttributes`, §II.23.1.14
pub mod PropertyAttributes {
    /// Property is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// Runtime (metadata internal APIs) should check name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0400;
    /// Property has default
    pub const HAS_DEFAULT: u32 = 0x1000;
}

#[allow(non_snake_case)]
/// All possible flags for `EventAttributes`, §II.23.1.4
pub mod EventAttributes {
    /// Event is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// CLI provides 'special' behavior, depending upon the name of the event
    pub const RTSPECIAL_NAME: u32 = 0x0400;
}

#[allow(non_snake_case)]
/// All possible flags for `GenericParamAttributes`, §II.23.1.7
pub mod GenericParamAttributes {
    /// Mask for the variance bits
    pub const VARIANCE_MASK: u32 = 0x0003;
    /// The generic parameter is covariant
    pub const COVARIANT: u32 = 0x0001;
    /// The generic parameter is contravariant
    pub const CONTRAVARIANT: u32 = 0x0002;
    /// The generic parameter has a reference type constraint
    pub const REFERENCE_TYPE_CONSTRAINT: u32 = 0x0004;
    /// The generic parameter has a value type constraint
    pub const NOT_NULLABLE_VALUE_TYPE_CONSTRAINT: u32 = 0x0008;
    /// The generic parameter has a constructor constraint
    pub const DEFAULT_CONSTRUCTOR_CONSTRAINT: u32 = 0x0010;
}

/// Bitmask for `CODE_TYPE` extraction
pub const METHOD_IMPL_CODE_TYPE_MASK: u32 = 0x0003;
/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for `VTABLE_LAYOUT` information extraction
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method implementation code type flags
    pub struct MethodImplCodeType: u32 {
        /// Method impl is IL
        const IL = 0x0000;
        /// Method impl is native
        const NATIVE = 0x0001;
        /// Method impl is OPTIL
        const OPTIL = 0x0002;
        /// Method impl is provided by the runtime
        const RUNTIME = 0x0003;
    }
}

impl MethodImplCodeType {
    /// Extract code type from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_IMPL_CODE_TYPE_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method implementation additional options
    pub struct MethodImplOptions: u32 {
        /// Method impl is unmanaged, otherwise managed
        const UNMANAGED = 0x0004;
        /// Method cannot be inlined
        const NO_INLINING = 0x0008;
        /// Method is a synchronized method
        const SYNCHRONIZED = 0x0020;
        /// Method signature is exported as is
        const PRESERVE_SIG = 0x0080;
        /// Method is implemented inside the runtime
        const INTERNAL_CALL = 0x1000;
    }
}

impl MethodImplOptions {
    /// Extract implementation options from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_IMPL_CODE_TYPE_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method vtable layout flags
    pub struct MethodVtableFlags: u32 {
        /// Method reuses existing slot in vtable
        const REUSE_SLOT = 0x0000;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
    }
}

impl MethodVtableFlags {
    /// Extract vtable layout flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overriden if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, dpending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
        /// Method has security associate with it
        const HAS_SECURITY = 0x4000;
        /// Method calls another method containing security code
        const REQUIRE_SEC_OBJECT = 0x8000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Calling convention byte of a method or property signature, §II.23.2.1
    pub struct CallingConvention: u8 {
        /// Default managed calling convention
        const DEFAULT = 0x00;
        /// Variable argument list (`__arglist`)
        const VARARG = 0x05;
        /// Property signature marker
        const PROPERTY = 0x08;
        /// Method has generic parameters
        const GENERIC = 0x10;
        /// Instance method, `this` is passed implicitly
        const HAS_THIS = 0x20;
        /// `this` is passed explicitly as first parameter
        const EXPLICIT_THIS = 0x40;
    }
}

impl CallingConvention {
    /// Returns true if the signature accepts extra (vararg) arguments
    #[must_use]
    pub fn accepts_extra_arguments(&self) -> bool {
        self.bits() & 0x0F == Self::VARARG.bits()
    }
}

/// Member visibility as reported to a metadata writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Visibility {
    /// Member not referenceable
    CompilerControlled,
    /// Accessible only by the parent type
    Private,
    /// Accessible by sub-types only in this assembly
    FamilyAndAssembly,
    /// Accessible by anyone in the assembly
    Assembly,
    /// Accessible only by type and sub-types
    Family,
    /// Accessible by sub-types anywhere, plus anyone in the assembly
    FamilyOrAssembly,
    /// Accessible by anyone
    Public,
}

impl Visibility {
    /// Decode the 3-bit member access field shared by fields and methods
    #[must_use]
    pub fn from_member_access(flags: u32) -> Self {
        match flags & METHOD_ACCESS_MASK {
            0x0001 => Visibility::Private,
            0x0002 => Visibility::FamilyAndAssembly,
            0x0003 => Visibility::Assembly,
            0x0004 => Visibility::Family,
            0x0005 => Visibility::FamilyOrAssembly,
            0x0006 => Visibility::Public,
            _ => Visibility::CompilerControlled,
        }
    }

    /// Pick the more accessible of two visibilities, used for properties and events whose
    /// visibility is derived from their accessors
    #[must_use]
    pub fn widest(self, other: Visibility) -> Visibility {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    fn rank(self) -> u8 {
        match self {
            Visibility::CompilerControlled => 0,
            Visibility::Private => 1,
            Visibility::FamilyAndAssembly => 2,
            Visibility::Assembly | Visibility::Family => 3,
            Visibility::FamilyOrAssembly => 4,
            Visibility::Public => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_flag_groups() {
        let flags = 0x0006 | 0x0040 | 0x0080 | 0x0100 | 0x0400;

        assert_eq!(
            MethodAccessFlags::from_method_flags(flags),
            MethodAccessFlags::PUBLIC
        );
        assert_eq!(
            MethodVtableFlags::from_method_flags(flags),
            MethodVtableFlags::NEW_SLOT
        );
        let modifiers = MethodModifiers::from_method_flags(flags);
        assert!(modifiers.contains(MethodModifiers::VIRTUAL));
        assert!(modifiers.contains(MethodModifiers::HIDE_BY_SIG));
        assert!(modifiers.contains(MethodModifiers::ABSTRACT));
        assert!(!modifiers.contains(MethodModifiers::STATIC));
    }

    #[test]
    fn test_impl_flags() {
        assert_eq!(
            MethodImplCodeType::from_impl_flags(0x0003),
            MethodImplCodeType::RUNTIME
        );
        assert!(
            MethodImplOptions::from_impl_flags(0x1003).contains(MethodImplOptions::INTERNAL_CALL)
        );
    }

    #[test]
    fn test_visibility() {
        assert_eq!(
            Visibility::from_member_access(FieldAttributes::PUBLIC),
            Visibility::Public
        );
        assert_eq!(
            Visibility::from_member_access(FieldAttributes::PRIVATE | FieldAttributes::STATIC),
            Visibility::Private
        );
        assert_eq!(
            Visibility::Private.widest(Visibility::Public),
            Visibility::Public
        );
        assert_eq!(
            Visibility::Family.widest(Visibility::Private),
            Visibility::Family
        );
    }

    #[test]
    fn test_calling_convention_vararg() {
        let cc = CallingConvention::VARARG | CallingConvention::HAS_THIS;
        assert!(cc.accepts_extra_arguments());
        assert!(!CallingConvention::HAS_THIS.accepts_extra_arguments());
    }
}

//! Well-known attribute constructors used to re-create attributes on embedded definitions.
//!
//! A well-known member is identified by description (declaring type + signature) instead of
//! by a symbol reference, so the compiler can resolve it against whatever core library the
//! compilation targets. Each variant names one attribute constructor overload.

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

use crate::metadata::customattributes::AttributeParamType;

const INTEROP_SERVICES: &str = "System.Runtime.InteropServices";
const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";

/// Attribute constructors the embedding layer synthesizes attributes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, IntoStaticStr)]
pub enum WellKnownMember {
    /// `GuidAttribute(string)`
    GuidAttribute,
    /// `ComEventInterfaceAttribute(Type, Type)`
    ComEventInterfaceAttribute,
    /// `InterfaceTypeAttribute(short)`
    InterfaceTypeAttributeInt16,
    /// `InterfaceTypeAttribute(ComInterfaceType)`
    InterfaceTypeAttributeComInterfaceType,
    /// `BestFitMappingAttribute(bool)`
    BestFitMappingAttribute,
    /// `CoClassAttribute(Type)`
    CoClassAttribute,
    /// `FlagsAttribute()`
    FlagsAttribute,
    /// `DefaultMemberAttribute(string)`
    DefaultMemberAttribute,
    /// `UnmanagedFunctionPointerAttribute(CallingConvention)`
    UnmanagedFunctionPointerAttribute,
    /// `ExtendedLayoutAttribute(ExtendedLayoutKind)`
    ExtendedLayoutAttribute,
    /// `TypeIdentifierAttribute()`
    TypeIdentifierAttribute,
    /// `TypeIdentifierAttribute(string scope, string identifier)`
    TypeIdentifierAttributeStringString,
    /// `CompilerGeneratedAttribute()`
    CompilerGeneratedAttribute,
    /// `DispIdAttribute(int)`
    DispIdAttribute,
    /// `LCIDConversionAttribute(int)`
    LcidConversionAttribute,
    /// `ParamArrayAttribute()`
    ParamArrayAttribute,
    /// `DateTimeConstantAttribute(long)`
    DateTimeConstantAttribute,
    /// `DecimalConstantAttribute(byte, byte, uint, uint, uint)`
    DecimalConstantAttribute,
    /// `DecimalConstantAttribute(byte, byte, int, int, int)`
    DecimalConstantAttributeByteByteInt32Int32Int32,
    /// `DefaultParameterValueAttribute(object)`
    DefaultParameterValueAttribute,
}

impl WellKnownMember {
    /// Namespace of the declaring attribute class
    #[must_use]
    pub fn attribute_namespace(&self) -> &'static str {
        match self {
            WellKnownMember::FlagsAttribute | WellKnownMember::ParamArrayAttribute => "System",
            WellKnownMember::DefaultMemberAttribute => "System.Reflection",
            WellKnownMember::CompilerGeneratedAttribute
            | WellKnownMember::DateTimeConstantAttribute
            | WellKnownMember::DecimalConstantAttribute
            | WellKnownMember::DecimalConstantAttributeByteByteInt32Int32Int32 => COMPILER_SERVICES,
            _ => INTEROP_SERVICES,
        }
    }

    /// Simple name of the declaring attribute class
    #[must_use]
    pub fn attribute_name(&self) -> &'static str {
        match self {
            WellKnownMember::GuidAttribute => "GuidAttribute",
            WellKnownMember::ComEventInterfaceAttribute => "ComEventInterfaceAttribute",
            WellKnownMember::InterfaceTypeAttributeInt16
            | WellKnownMember::InterfaceTypeAttributeComInterfaceType => "InterfaceTypeAttribute",
            WellKnownMember::BestFitMappingAttribute => "BestFitMappingAttribute",
            WellKnownMember::CoClassAttribute => "CoClassAttribute",
            WellKnownMember::FlagsAttribute => "FlagsAttribute",
            WellKnownMember::DefaultMemberAttribute => "DefaultMemberAttribute",
            WellKnownMember::UnmanagedFunctionPointerAttribute => {
                "UnmanagedFunctionPointerAttribute"
            }
            WellKnownMember::ExtendedLayoutAttribute => "ExtendedLayoutAttribute",
            WellKnownMember::TypeIdentifierAttribute
            | WellKnownMember::TypeIdentifierAttributeStringString => "TypeIdentifierAttribute",
            WellKnownMember::CompilerGeneratedAttribute => "CompilerGeneratedAttribute",
            WellKnownMember::DispIdAttribute => "DispIdAttribute",
            WellKnownMember::LcidConversionAttribute => "LCIDConversionAttribute",
            WellKnownMember::ParamArrayAttribute => "ParamArrayAttribute",
            WellKnownMember::DateTimeConstantAttribute => "DateTimeConstantAttribute",
            WellKnownMember::DecimalConstantAttribute
            | WellKnownMember::DecimalConstantAttributeByteByteInt32Int32Int32 => {
                "DecimalConstantAttribute"
            }
            WellKnownMember::DefaultParameterValueAttribute => "DefaultParameterValueAttribute",
        }
    }

    /// Fully qualified name of the declaring attribute class
    #[must_use]
    pub fn attribute_type(&self) -> String {
        format!("{}.{}", self.attribute_namespace(), self.attribute_name())
    }

    /// Constructor parameter types
    #[must_use]
    pub fn parameters(&self) -> Vec<AttributeParamType> {
        use AttributeParamType as P;

        match self {
            WellKnownMember::GuidAttribute | WellKnownMember::DefaultMemberAttribute => {
                vec![P::String]
            }
            WellKnownMember::ComEventInterfaceAttribute => vec![P::Type, P::Type],
            WellKnownMember::InterfaceTypeAttributeInt16 => vec![P::I2],
            WellKnownMember::InterfaceTypeAttributeComInterfaceType => vec![P::Enum(
                "System.Runtime.InteropServices.ComInterfaceType".into(),
            )],
            WellKnownMember::BestFitMappingAttribute => vec![P::Bool],
            WellKnownMember::CoClassAttribute => vec![P::Type],
            WellKnownMember::UnmanagedFunctionPointerAttribute => vec![P::Enum(
                "System.Runtime.InteropServices.CallingConvention".into(),
            )],
            WellKnownMember::ExtendedLayoutAttribute => vec![P::Enum(
                "System.Runtime.InteropServices.ExtendedLayoutKind".into(),
            )],
            WellKnownMember::TypeIdentifierAttributeStringString => vec![P::String, P::String],
            WellKnownMember::DispIdAttribute | WellKnownMember::LcidConversionAttribute => {
                vec![P::I4]
            }
            WellKnownMember::DateTimeConstantAttribute => vec![P::I8],
            WellKnownMember::DecimalConstantAttribute => {
                vec![P::U1, P::U1, P::U4, P::U4, P::U4]
            }
            WellKnownMember::DecimalConstantAttributeByteByteInt32Int32Int32 => {
                vec![P::U1, P::U1, P::I4, P::I4, P::I4]
            }
            WellKnownMember::DefaultParameterValueAttribute => vec![P::Object],
            WellKnownMember::FlagsAttribute
            | WellKnownMember::TypeIdentifierAttribute
            | WellKnownMember::CompilerGeneratedAttribute
            | WellKnownMember::ParamArrayAttribute => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_attribute_types() {
        assert_eq!(
            WellKnownMember::GuidAttribute.attribute_type(),
            "System.Runtime.InteropServices.GuidAttribute"
        );
        assert_eq!(
            WellKnownMember::FlagsAttribute.attribute_type(),
            "System.FlagsAttribute"
        );
        assert_eq!(
            WellKnownMember::DefaultMemberAttribute.attribute_type(),
            "System.Reflection.DefaultMemberAttribute"
        );
        assert_eq!(
            WellKnownMember::DecimalConstantAttributeByteByteInt32Int32Int32.attribute_type(),
            "System.Runtime.CompilerServices.DecimalConstantAttribute"
        );
    }

    #[test]
    fn test_overloads_differ_in_signature() {
        assert_ne!(
            WellKnownMember::TypeIdentifierAttribute.parameters(),
            WellKnownMember::TypeIdentifierAttributeStringString.parameters()
        );
        assert_ne!(
            WellKnownMember::DecimalConstantAttribute.parameters(),
            WellKnownMember::DecimalConstantAttributeByteByteInt32Int32Int32.parameters()
        );
        for member in WellKnownMember::iter() {
            assert!(member.attribute_name().ends_with("Attribute"));
        }
        assert_eq!(WellKnownMember::COUNT, WellKnownMember::iter().count());
    }
}

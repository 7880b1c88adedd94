//! Custom attribute representation for embedded definitions.
//!
//! Embedded definitions do not carry the attributes of their underlying symbols. Every
//! attribute that matters for COM interop is recognized on the source side, checked for the
//! expected constructor shape and re-created from a well-known constructor on the embedded
//! side. This module holds the vocabulary for both halves:
//!
//! - [`AttributeData`] - an attribute as reported by the symbol layer (class, constructor
//!   signature, decoded arguments)
//! - [`AttributeDescription`] - the catalog of interop attributes and their constructor
//!   overloads, used to recognize source attributes
//! - [`SynthesizedAttribute`] - an attribute re-created for an embedded definition
//!
//! Argument values follow the ECMA-335 II.23.3 custom attribute encoding model.
//!
//! # Examples
//!
//! ```rust
//! use nopia::metadata::customattributes::{
//!     AttributeData, AttributeDescription, AttributeParamType, CustomAttributeArgument,
//! };
//!
//! let guid = AttributeData::new(
//!     "System.Runtime.InteropServices",
//!     "GuidAttribute",
//!     vec![AttributeParamType::String],
//!     vec![CustomAttributeArgument::string("00020400-0000-0000-c000-000000000046")],
//! );
//!
//! assert_eq!(AttributeDescription::GUID_ATTRIBUTE.signature_index(&guid), Some(0));
//! ```
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.3 - Custom Attributes

mod description;
mod types;

pub use description::AttributeDescription;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::wellknown::WellKnownMember;

    #[test]
    fn test_synthesized_display() {
        let attr = SynthesizedAttribute::new(
            WellKnownMember::TypeIdentifierAttributeStringString,
            vec![
                CustomAttributeArgument::string("a"),
                CustomAttributeArgument::string("b"),
            ],
            Vec::new(),
        );

        assert_eq!(
            attr.to_string(),
            "System.Runtime.InteropServices.TypeIdentifierAttribute(\"a\", \"b\")"
        );
        assert_eq!(attr.fixed_args().len(), 2);
        assert!(attr.named_args().is_empty());
    }

    #[test]
    fn test_synthesized_display_named() {
        let attr = SynthesizedAttribute::new(
            WellKnownMember::BestFitMappingAttribute,
            vec![CustomAttributeArgument::Bool(false)],
            vec![CustomAttributeNamedArgument {
                is_field: true,
                name: "ThrowOnUnmappableChar".to_string(),
                arg_type: "System.Boolean".to_string(),
                value: CustomAttributeArgument::Bool(true),
            }],
        );

        assert_eq!(
            attr.to_string(),
            "System.Runtime.InteropServices.BestFitMappingAttribute(false, ThrowOnUnmappableChar = true)"
        );
    }

    #[test]
    fn test_no_argument_display() {
        let attr = SynthesizedAttribute::new(
            WellKnownMember::CompilerGeneratedAttribute,
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(
            attr.to_string(),
            "System.Runtime.CompilerServices.CompilerGeneratedAttribute"
        );
    }

    #[test]
    fn test_attribute_data_accessors() {
        let attr = AttributeData::new(
            "System.Runtime.InteropServices",
            "ComEventInterfaceAttribute",
            vec![AttributeParamType::Type, AttributeParamType::Type],
            vec![
                CustomAttributeArgument::type_name("Lib.ISource"),
                CustomAttributeArgument::type_name("Lib.EventProvider"),
            ],
        );

        assert_eq!(
            attr.full_name(),
            "System.Runtime.InteropServices.ComEventInterfaceAttribute"
        );
        assert_eq!(attr.fixed_args()[0].as_type_name(), Some("Lib.ISource"));
        assert_eq!(attr.fixed_args()[0].as_str(), None);
        assert_eq!(attr.fixed_args()[1].to_string(), "typeof(Lib.EventProvider)");
    }
}

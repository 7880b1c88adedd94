//! Descriptions of the interop attributes the embedding layer recognizes.
//!
//! An [`AttributeDescription`] identifies an attribute class by namespace and name together
//! with the list of constructor signatures it is known to have. Matching an attribute
//! against a description yields the index of the constructor signature that was used, which
//! decides the overload an attribute is re-created with (e.g. the two `InterfaceTypeAttribute`
//! or `DecimalConstantAttribute` constructors).

use std::borrow::Cow;

use crate::metadata::customattributes::{AttributeData, AttributeParamType};

const INTEROP_SERVICES: &str = "System.Runtime.InteropServices";
const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";

const COM_INTERFACE_TYPE: AttributeParamType =
    AttributeParamType::Enum(Cow::Borrowed("System.Runtime.InteropServices.ComInterfaceType"));
const CALLING_CONVENTION: AttributeParamType =
    AttributeParamType::Enum(Cow::Borrowed("System.Runtime.InteropServices.CallingConvention"));
const EXTENDED_LAYOUT_KIND: AttributeParamType =
    AttributeParamType::Enum(Cow::Borrowed("System.Runtime.InteropServices.ExtendedLayoutKind"));

/// Description of a well-known attribute class and its constructor signatures
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescription {
    /// Namespace of the attribute class
    pub namespace: &'static str,
    /// Simple name of the attribute class
    pub name: &'static str,
    /// Known constructor signatures, in overload order
    pub signatures: &'static [&'static [AttributeParamType]],
}

impl AttributeDescription {
    /// `System.Runtime.InteropServices.GuidAttribute`
    pub const GUID_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "GuidAttribute",
        signatures: &[&[AttributeParamType::String]],
    };

    /// `System.Runtime.InteropServices.ComImportAttribute`
    pub const COM_IMPORT_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "ComImportAttribute",
        signatures: &[&[]],
    };

    /// `System.Runtime.InteropServices.ComEventInterfaceAttribute`
    pub const COM_EVENT_INTERFACE_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "ComEventInterfaceAttribute",
        signatures: &[&[AttributeParamType::Type, AttributeParamType::Type]],
    };

    /// `System.Runtime.InteropServices.InterfaceTypeAttribute`
    pub const INTERFACE_TYPE_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "InterfaceTypeAttribute",
        signatures: &[&[AttributeParamType::I2], &[COM_INTERFACE_TYPE]],
    };

    /// `System.Runtime.InteropServices.BestFitMappingAttribute`
    pub const BEST_FIT_MAPPING_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "BestFitMappingAttribute",
        signatures: &[&[AttributeParamType::Bool]],
    };

    /// `System.Runtime.InteropServices.CoClassAttribute`
    pub const CO_CLASS_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "CoClassAttribute",
        signatures: &[&[AttributeParamType::Type]],
    };

    /// `System.FlagsAttribute`
    pub const FLAGS_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: "System",
        name: "FlagsAttribute",
        signatures: &[&[]],
    };

    /// `System.Reflection.DefaultMemberAttribute`
    pub const DEFAULT_MEMBER_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: "System.Reflection",
        name: "DefaultMemberAttribute",
        signatures: &[&[AttributeParamType::String]],
    };

    /// `System.Runtime.InteropServices.UnmanagedFunctionPointerAttribute`
    pub const UNMANAGED_FUNCTION_POINTER_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "UnmanagedFunctionPointerAttribute",
        signatures: &[&[CALLING_CONVENTION]],
    };

    /// `System.Runtime.InteropServices.ExtendedLayoutAttribute`
    pub const EXTENDED_LAYOUT_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "ExtendedLayoutAttribute",
        signatures: &[&[EXTENDED_LAYOUT_KIND]],
    };

    /// `System.Runtime.InteropServices.DispIdAttribute`
    pub const DISP_ID_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "DispIdAttribute",
        signatures: &[&[AttributeParamType::I4]],
    };

    /// `System.Runtime.InteropServices.LCIDConversionAttribute`
    pub const LCID_CONVERSION_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "LCIDConversionAttribute",
        signatures: &[&[AttributeParamType::I4]],
    };

    /// `System.ParamArrayAttribute`
    pub const PARAM_ARRAY_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: "System",
        name: "ParamArrayAttribute",
        signatures: &[&[]],
    };

    /// `System.Runtime.CompilerServices.DateTimeConstantAttribute`
    pub const DATE_TIME_CONSTANT_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: COMPILER_SERVICES,
        name: "DateTimeConstantAttribute",
        signatures: &[&[AttributeParamType::I8]],
    };

    /// `System.Runtime.CompilerServices.DecimalConstantAttribute`
    pub const DECIMAL_CONSTANT_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: COMPILER_SERVICES,
        name: "DecimalConstantAttribute",
        signatures: &[
            &[
                AttributeParamType::U1,
                AttributeParamType::U1,
                AttributeParamType::U4,
                AttributeParamType::U4,
                AttributeParamType::U4,
            ],
            &[
                AttributeParamType::U1,
                AttributeParamType::U1,
                AttributeParamType::I4,
                AttributeParamType::I4,
                AttributeParamType::I4,
            ],
        ],
    };

    /// `System.Runtime.InteropServices.DefaultParameterValueAttribute`
    pub const DEFAULT_PARAMETER_VALUE_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "DefaultParameterValueAttribute",
        signatures: &[&[AttributeParamType::Object]],
    };

    /// `System.Runtime.InteropServices.TypeIdentifierAttribute`
    pub const TYPE_IDENTIFIER_ATTRIBUTE: AttributeDescription = AttributeDescription {
        namespace: INTEROP_SERVICES,
        name: "TypeIdentifierAttribute",
        signatures: &[&[], &[AttributeParamType::String, AttributeParamType::String]],
    };

    /// Fully qualified name of the attribute class
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Match an attribute against this description.
    ///
    /// Returns the index of the matching constructor signature, or `None` if the attribute
    /// is of a different class or was created through an unknown constructor. Names are
    /// compared ordinally.
    #[must_use]
    pub fn signature_index(&self, attribute: &AttributeData) -> Option<usize> {
        if attribute.namespace != self.namespace || attribute.name != self.name {
            return None;
        }

        self.signatures
            .iter()
            .position(|signature| *signature == attribute.constructor.as_slice())
    }
}

//! Marshalling descriptors carried by embedded fields, parameters and return values.
//!
//! COM interop types rely heavily on explicit marshalling (`BSTR` strings, `IDispatch`
//! interfaces, `SAFEARRAY`s). An embedded definition must reproduce the descriptor of the
//! original member byte for byte, otherwise the runtime marshals the local copy differently
//! from the type it is unified with. The descriptor blob follows ECMA-335 II.23.2.9; this
//! module keeps it opaque and only decodes the leading native type for inspection.

use std::sync::Arc;

#[allow(non_snake_case)]
/// Native type constants as defined in ECMA-335 II.23.2.9 and `CoreCLR` extensions.
pub mod NATIVE_TYPE {
    /// Indicates the end of a native type list
    pub const END: u8 = 0x00;
    /// 4-byte boolean value where non-zero is true
    pub const BOOLEAN: u8 = 0x02;
    /// Signed 16-bit integer
    pub const I2: u8 = 0x05;
    /// Signed 32-bit integer
    pub const I4: u8 = 0x07;
    /// Unsigned 32-bit integer
    pub const U4: u8 = 0x08;
    /// COM VARIANT type
    pub const VARIANT: u8 = 0x0e;
    /// COM CURRENCY type
    pub const CURRENCY: u8 = 0x0f;
    /// COM DATE type
    pub const DATE: u8 = 0x12;
    /// COM BSTR (length-prefixed Unicode string)
    pub const BSTR: u8 = 0x13;
    /// Null-terminated ANSI string pointer
    pub const LPSTR: u8 = 0x14;
    /// Null-terminated Unicode string pointer
    pub const LPWSTR: u8 = 0x15;
    /// COM IUnknown interface pointer
    pub const IUNKNOWN: u8 = 0x19;
    /// COM IDispatch interface pointer
    pub const IDISPATCH: u8 = 0x1a;
    /// COM interface pointer
    pub const INTERFACE: u8 = 0x1c;
    /// COM SAFEARRAY
    pub const SAFEARRAY: u8 = 0x1d;
    /// Fixed-size array
    pub const FIXEDARRAY: u8 = 0x1e;
    /// COM VARIANT_BOOL (2-byte boolean)
    pub const VARIANTBOOL: u8 = 0x25;
    /// Variable-length array
    pub const ARRAY: u8 = 0x2a;
    /// Custom marshaler
    pub const CUSTOMMARSHALER: u8 = 0x2c;
}

/// An explicit marshalling descriptor (`FieldMarshal` row) attached to a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshallingInfo {
    descriptor: Arc<[u8]>,
}

impl MarshallingInfo {
    /// Wrap an encoded descriptor blob
    #[must_use]
    pub fn new(descriptor: &[u8]) -> Self {
        MarshallingInfo {
            descriptor: Arc::from(descriptor),
        }
    }

    /// Descriptor consisting of a single native type
    #[must_use]
    pub fn native(native_type: u8) -> Self {
        Self::new(&[native_type])
    }

    /// The encoded descriptor, as it must be written to the `FieldMarshal` table
    #[must_use]
    pub fn descriptor(&self) -> &[u8] {
        &self.descriptor
    }

    /// The leading native type of the descriptor, if any
    #[must_use]
    pub fn native_type(&self) -> Option<u8> {
        self.descriptor.first().copied()
    }

    /// Returns true if the descriptor marshals as a COM interface pointer
    #[must_use]
    pub fn is_com_interface(&self) -> bool {
        matches!(
            self.native_type(),
            Some(NATIVE_TYPE::IUNKNOWN | NATIVE_TYPE::IDISPATCH | NATIVE_TYPE::INTERFACE)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_roundtrips_bytes() {
        let info = MarshallingInfo::new(&[NATIVE_TYPE::SAFEARRAY, 0x08]);
        assert_eq!(info.descriptor(), &[0x1d, 0x08]);
        assert_eq!(info.native_type(), Some(NATIVE_TYPE::SAFEARRAY));
        assert!(!info.is_com_interface());
    }

    #[test]
    fn test_com_interface_descriptor() {
        assert!(MarshallingInfo::native(NATIVE_TYPE::IDISPATCH).is_com_interface());
        assert!(MarshallingInfo::native(NATIVE_TYPE::IUNKNOWN).is_com_interface());
        assert_eq!(MarshallingInfo::new(&[]).native_type(), None);
    }
}

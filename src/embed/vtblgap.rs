//! Virtual table gap placeholders.
//!
//! When only some methods of a COM interface are embedded, the skipped methods still occupy
//! vtable slots in the original interface. A [`VtblGap`] stands in for a run of skipped methods
//! so that the embedded methods keep their slot numbers. The runtime recognizes gaps by their
//! special name and reserves `size` slots for each.

use std::fmt;

use crate::metadata::{
    customattributes::SynthesizedAttribute,
    flags::{CallingConvention, MethodAccessFlags, MethodImplCodeType, MethodModifiers, Visibility},
};

/// A synthetic method reserving `size` vtable slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VtblGap {
    ordinal: u32,
    size: u32,
    name: String,
}

impl VtblGap {
    /// Create the gap with the given 1-based ordinal, reserving `size` slots
    #[must_use]
    pub fn new(ordinal: u32, size: u32) -> Self {
        VtblGap {
            ordinal,
            size,
            name: format!("gap_{ordinal}_{size}"),
        }
    }

    /// 1-based position of the gap among the gaps of its type
    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Number of vtable slots reserved
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Method name, `gap_<ordinal>_<size>`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw `MethodAttributes`: public, special name, runtime special name
    #[must_use]
    pub fn flags(&self) -> u32 {
        MethodAccessFlags::PUBLIC.bits()
            | (MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME).bits()
    }

    /// Raw `MethodImplAttributes`: runtime implemented
    #[must_use]
    pub fn impl_flags(&self) -> u32 {
        MethodImplCodeType::RUNTIME.bits()
    }

    /// Gaps are public
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        Visibility::Public
    }

    /// Instance method signature
    #[must_use]
    pub fn calling_convention(&self) -> CallingConvention {
        CallingConvention::HAS_THIS
    }

    /// Gaps return `void`
    #[must_use]
    pub fn returns_void(&self) -> bool {
        true
    }

    /// Gaps take no parameters
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        0
    }

    /// Gaps have no body
    #[must_use]
    pub fn has_body(&self) -> bool {
        false
    }

    /// Gaps carry no attributes
    #[must_use]
    pub fn attributes(&self) -> &[SynthesizedAttribute] {
        &[]
    }
}

impl fmt::Display for VtblGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::flags::METHOD_ACCESS_MASK;

    #[test]
    fn test_gap_naming() {
        let gap = VtblGap::new(1, 3);
        assert_eq!(gap.name(), "gap_1_3");
        assert_eq!(gap.to_string(), "gap_1_3");
        assert_eq!(gap.ordinal(), 1);
        assert_eq!(gap.size(), 3);
    }

    #[test]
    fn test_gap_definition_shape() {
        let gap = VtblGap::new(2, 1);

        assert_eq!(
            MethodAccessFlags::from_method_flags(gap.flags()),
            MethodAccessFlags::PUBLIC
        );
        assert_eq!(gap.flags() & METHOD_ACCESS_MASK, 0x0006);
        let modifiers = MethodModifiers::from_method_flags(gap.flags());
        assert!(modifiers.contains(MethodModifiers::SPECIAL_NAME));
        assert!(modifiers.contains(MethodModifiers::RTSPECIAL_NAME));
        assert!(!modifiers.contains(MethodModifiers::STATIC));
        assert_eq!(
            MethodImplCodeType::from_impl_flags(gap.impl_flags()),
            MethodImplCodeType::RUNTIME
        );
        assert_eq!(gap.calling_convention(), CallingConvention::HAS_THIS);
        assert!(gap.returns_void());
        assert_eq!(gap.parameter_count(), 0);
        assert!(!gap.has_body());
        assert!(gap.attributes().is_empty());
        assert_eq!(gap.visibility(), Visibility::Public);
    }
}

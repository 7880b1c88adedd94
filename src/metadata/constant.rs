//! Compile-time constant values attached to fields, parameters and properties.
//!
//! Embedded literal fields (enum members, COM constants) and optional parameters carry a
//! constant that the metadata writer stores in the `Constant` table (ECMA-335 II.22.9).
//! The embedding layer never interprets these values, it forwards them from the
//! underlying symbol.

use std::fmt;

/// A constant value as stored in the `Constant` table
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(u16),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// String constant
    String(String),
    /// Null reference
    Null,
}

impl ConstantValue {
    /// The `ELEMENT_TYPE` code this constant is stored with, §II.23.1.16
    #[must_use]
    pub fn element_type(&self) -> u8 {
        match self {
            ConstantValue::Bool(_) => 0x02,
            ConstantValue::Char(_) => 0x03,
            ConstantValue::I1(_) => 0x04,
            ConstantValue::U1(_) => 0x05,
            ConstantValue::I2(_) => 0x06,
            ConstantValue::U2(_) => 0x07,
            ConstantValue::I4(_) => 0x08,
            ConstantValue::U4(_) => 0x09,
            ConstantValue::I8(_) => 0x0A,
            ConstantValue::U8(_) => 0x0B,
            ConstantValue::R4(_) => 0x0C,
            ConstantValue::R8(_) => 0x0D,
            ConstantValue::String(_) => 0x0E,
            ConstantValue::Null => 0x12,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Bool(v) => write!(f, "{v}"),
            ConstantValue::Char(v) => write!(f, "'\\u{v:04x}'"),
            ConstantValue::I1(v) => write!(f, "{v}"),
            ConstantValue::U1(v) => write!(f, "{v}"),
            ConstantValue::I2(v) => write!(f, "{v}"),
            ConstantValue::U2(v) => write!(f, "{v}"),
            ConstantValue::I4(v) => write!(f, "{v}"),
            ConstantValue::U4(v) => write!(f, "{v}"),
            ConstantValue::I8(v) => write!(f, "{v}"),
            ConstantValue::U8(v) => write!(f, "{v}"),
            ConstantValue::R4(v) => write!(f, "{v}"),
            ConstantValue::R8(v) => write!(f, "{v}"),
            ConstantValue::String(v) => write!(f, "\"{v}\""),
            ConstantValue::Null => write!(f, "null"),
        }
    }
}

//! CustomAttribute-specific types and data structures.
//!
//! This module contains the types used for representing custom attribute data on both sides
//! of the embedding layer: [`AttributeData`] as handed over by the symbol layer, and
//! [`SynthesizedAttribute`] as produced for an embedded definition. Argument values follow the
//! ECMA-335 II.23.3 encoding model.

use std::{borrow::Cow, fmt};

use crate::metadata::wellknown::WellKnownMember;

/// Represents a parsed custom attribute value with arguments and named arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomAttributeValue {
    /// Fixed arguments from the constructor signature
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
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
    /// UTF-8 string, `None` for a null string
    String(Option<String>),
    /// Type reference (as fully qualified name), `None` for a null type
    Type(Option<String>),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
    /// Enum value (enum type name + underlying value)
    Enum(String, Box<CustomAttributeArgument>),
}

impl CustomAttributeArgument {
    /// Convenience constructor for a non-null string argument
    #[must_use]
    pub fn string(value: &str) -> Self {
        CustomAttributeArgument::String(Some(value.to_string()))
    }

    /// Convenience constructor for a non-null type argument
    #[must_use]
    pub fn type_name(value: &str) -> Self {
        CustomAttributeArgument::Type(Some(value.to_string()))
    }

    /// Returns the string payload, if this is a non-null string argument
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CustomAttributeArgument::String(Some(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the type name payload, if this is a non-null type argument
    #[must_use]
    pub fn as_type_name(&self) -> Option<&str> {
        match self {
            CustomAttributeArgument::Type(Some(value)) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for CustomAttributeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomAttributeArgument::Bool(v) => write!(f, "{v}"),
            CustomAttributeArgument::Char(v) => write!(f, "'{v}'"),
            CustomAttributeArgument::I1(v) => write!(f, "{v}"),
            CustomAttributeArgument::U1(v) => write!(f, "{v}"),
            CustomAttributeArgument::I2(v) => write!(f, "{v}"),
            CustomAttributeArgument::U2(v) => write!(f, "{v}"),
            CustomAttributeArgument::I4(v) => write!(f, "{v}"),
            CustomAttributeArgument::U4(v) => write!(f, "{v}"),
            CustomAttributeArgument::I8(v) => write!(f, "{v}"),
            CustomAttributeArgument::U8(v) => write!(f, "{v}"),
            CustomAttributeArgument::R4(v) => write!(f, "{v}"),
            CustomAttributeArgument::R8(v) => write!(f, "{v}"),
            CustomAttributeArgument::String(Some(v)) => write!(f, "\"{v}\""),
            CustomAttributeArgument::Type(Some(v)) => write!(f, "typeof({v})"),
            CustomAttributeArgument::String(None) | CustomAttributeArgument::Type(None) => {
                write!(f, "null")
            }
            CustomAttributeArgument::Array(values) => {
                write!(f, "{{")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "}}")
            }
            CustomAttributeArgument::Enum(name, value) => write!(f, "({name}){value}"),
        }
    }
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Type of the argument
    pub arg_type: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}

/// Parameter type of an attribute constructor, used to tell constructor overloads apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeParamType {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `sbyte`
    I1,
    /// `byte`
    U1,
    /// `short`
    I2,
    /// `ushort`
    U2,
    /// `int`
    I4,
    /// `uint`
    U4,
    /// `long`
    I8,
    /// `ulong`
    U8,
    /// `float`
    R4,
    /// `double`
    R8,
    /// `string`
    String,
    /// `System.Type`
    Type,
    /// `object`
    Object,
    /// An enum type, by fully qualified name
    Enum(Cow<'static, str>),
}

/// A custom attribute as it appears on an underlying symbol.
///
/// The symbol layer hands these over in "attributes to emit" order. Besides the decoded
/// arguments they identify the attribute class and the constructor signature that was used,
/// which is what interop attribute recognition keys on.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeData {
    /// Namespace of the attribute class
    pub namespace: String,
    /// Simple name of the attribute class
    pub name: String,
    /// Parameter types of the constructor used
    pub constructor: Vec<AttributeParamType>,
    /// Decoded arguments
    pub value: CustomAttributeValue,
}

impl AttributeData {
    /// Create attribute data with fixed arguments only
    #[must_use]
    pub fn new(
        namespace: &str,
        name: &str,
        constructor: Vec<AttributeParamType>,
        fixed_args: Vec<CustomAttributeArgument>,
    ) -> Self {
        AttributeData {
            namespace: namespace.to_string(),
            name: name.to_string(),
            constructor,
            value: CustomAttributeValue {
                fixed_args,
                named_args: Vec::new(),
            },
        }
    }

    /// Attach named arguments
    #[must_use]
    pub fn with_named_args(mut self, named_args: Vec<CustomAttributeNamedArgument>) -> Self {
        self.value.named_args = named_args;
        self
    }

    /// Fixed (constructor) arguments
    #[must_use]
    pub fn fixed_args(&self) -> &[CustomAttributeArgument] {
        &self.value.fixed_args
    }

    /// Named arguments
    #[must_use]
    pub fn named_args(&self) -> &[CustomAttributeNamedArgument] {
        &self.value.named_args
    }

    /// Fully qualified name of the attribute class
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// A custom attribute re-created for an embedded definition.
///
/// Embedded definitions never copy an attribute of the underlying symbol verbatim: the
/// original constructor may live in an assembly that is not referenced at runtime. Instead
/// the attribute is rebuilt from a [`WellKnownMember`] constructor and the original arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAttribute {
    /// Constructor used to instantiate the attribute
    pub constructor: WellKnownMember,
    /// Argument values
    pub value: CustomAttributeValue,
}

impl SynthesizedAttribute {
    /// Create a synthesized attribute from a constructor and its arguments
    #[must_use]
    pub fn new(
        constructor: WellKnownMember,
        fixed_args: Vec<CustomAttributeArgument>,
        named_args: Vec<CustomAttributeNamedArgument>,
    ) -> Self {
        SynthesizedAttribute {
            constructor,
            value: CustomAttributeValue {
                fixed_args,
                named_args,
            },
        }
    }

    /// Fully qualified name of the attribute class
    #[must_use]
    pub fn attribute_type(&self) -> String {
        self.constructor.attribute_type()
    }

    /// Fixed (constructor) arguments
    #[must_use]
    pub fn fixed_args(&self) -> &[CustomAttributeArgument] {
        &self.value.fixed_args
    }

    /// Named arguments
    #[must_use]
    pub fn named_args(&self) -> &[CustomAttributeNamedArgument] {
        &self.value.named_args
    }
}

impl fmt::Display for SynthesizedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute_type())?;
        if self.value.fixed_args.is_empty() && self.value.named_args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        let mut first = true;
        for arg in &self.value.fixed_args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{arg}")?;
        }
        for named in &self.value.named_args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{} = {}", named.name, named.value)?;
        }
        write!(f, ")")
    }
}

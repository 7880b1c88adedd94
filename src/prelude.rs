//! # nopia Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! of the nopia library. Import it to get quick access to everything a compiler needs to
//! drive the embedding process and to implement a symbol binding.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all nopia operations
pub use crate::Error;

/// The result type used throughout nopia
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Orchestrator of the embedding process
pub use crate::embed::EmbeddedTypesManager;

/// Configuration of the embedding process
pub use crate::embed::EmbeddingConfig;

// ================================================================================================
// Binding Layer
// ================================================================================================

/// Traits a compiler implements to plug its symbols in
pub use crate::embed::{
    EmbeddingBinding, EventSymbol, FieldSymbol, MethodSymbol, ParameterSymbol, PropertySymbol,
    TypeKind, TypeLayout, TypeParameterSymbol, TypeSymbol,
};

// ================================================================================================
// Embedded Definitions
// ================================================================================================

/// Definitions handed to the metadata writer
pub use crate::embed::{
    EmbeddedEvent, EmbeddedField, EmbeddedMethod, EmbeddedParameter, EmbeddedProperty,
    EmbeddedType, EmbeddedTypeParameter, EmptyBody, MethodSlot, VtblGap,
};

/// Results of the embed operations
pub use crate::embed::{
    EventReference, FieldReference, MemberReference, MethodReference, PropertyReference,
};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Interop problems reported while embedding
pub use crate::embed::{Diagnostic, DiagnosticBag, DiagnosticCode, DiagnosticSeverity, Location};

// ================================================================================================
// Metadata Vocabulary
// ================================================================================================

/// Custom attribute values and interop attribute descriptions
pub use crate::metadata::customattributes::{
    AttributeData, AttributeDescription, AttributeParamType, CustomAttributeArgument,
    CustomAttributeNamedArgument, CustomAttributeValue, SynthesizedAttribute,
};

/// Well-known attribute constructors
pub use crate::metadata::wellknown::WellKnownMember;

/// Constant values of fields, parameters and properties
pub use crate::metadata::constant::ConstantValue;

/// Marshalling descriptors
pub use crate::metadata::marshalling::MarshallingInfo;

/// Method flag types
pub use crate::metadata::flags::{
    CallingConvention, MethodAccessFlags, MethodImplCodeType, MethodImplOptions, MethodModifiers,
    MethodVtableFlags, Visibility,
};

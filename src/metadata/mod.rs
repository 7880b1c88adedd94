//! Metadata vocabulary shared by every embedded definition.
//!
//! The embedding layer does not read or write PE files. It describes the definitions a
//! metadata writer has to emit, in terms of the ECMA-335 building blocks defined here:
//!
//! - [`flags`] - type, field, method, parameter, property, event and generic parameter flags
//! - [`constant`] - values of the `Constant` table
//! - [`marshalling`] - `FieldMarshal` descriptors
//! - [`customattributes`] - source attributes, interop attribute descriptions and synthesized
//!   attributes
//! - [`wellknown`] - attribute constructors synthesized attributes are built from

/// Implementation of compile-time constant values
pub mod constant;
/// Implementation of custom attribute representation and recognition
pub mod customattributes;
/// Implementation of the metadata flag constants and bitflags
pub mod flags;
/// Implementation of the type marshalling descriptors for native code invocations
pub mod marshalling;
/// Implementation of the well-known attribute constructors
pub mod wellknown;

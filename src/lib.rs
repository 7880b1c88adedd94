// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # nopia
//!
//! NoPIA type embedding for compilers that emit .NET metadata.
//!
//! When an assembly is compiled against a primary interop assembly (PIA) with "embed interop
//! types" enabled, the compiled module must not reference the PIA at runtime. Instead, every
//! COM interface, struct, enum and delegate the module actually uses is copied into it, reduced
//! to the members that are used, and marked with `TypeIdentifierAttribute` so that the runtime
//! treats the local copy as equivalent to the original.
//!
//! `nopia` implements this process independent of a particular compiler's symbol model.
//!
//! ## Features
//!
//! - **🔌 Binding-agnostic** - One algorithm over any symbol table implementing [`embed::EmbeddingBinding`]
//! - **🧵 Concurrent** - Lock-free get-or-create of embedded definitions from any number of threads
//! - **📐 Vtable-preserving** - Partially embedded COM interfaces keep their slot layout through gaps
//! - **🏷️ Attribute porting** - Interop attributes are re-created from well-known constructors
//! - **🔁 Deterministic** - The frozen type set has a total order independent of scheduling
//! - **🩺 Diagnostics** - Interop problems are reported, never thrown
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::collections::HashSet;
//! use nopia::prelude::*;
//!
//! let manager = EmbeddedTypesManager::new(binding, EmbeddingConfig::default());
//! let diagnostics = DiagnosticBag::new();
//!
//! // During code generation, for every referenced member
//! let method = manager.embed_method_if_need_to(&symbol, &Location::None, &diagnostics)?;
//!
//! // At emission time
//! let types = manager.get_types(&diagnostics, &HashSet::new());
//! println!("Embedding {} interop types", types.len());
//! # Ok::<(), nopia::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - Metadata vocabulary: flags, constants, marshalling, custom attributes
//! - [`embed`] - The embedding subsystem
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! Problems in the compiled code (an interface without `GuidAttribute`, an interop type
//! contributed by two assemblies, a nested type referenced through a linked assembly) are
//! [`embed::Diagnostic`]s collected in a caller supplied [`embed::DiagnosticBag`]. [`Error`] is
//! reserved for misuse by the calling compiler, such as reading member lists before the type
//! set is frozen.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use nopia::prelude::*;
///
/// let diagnostics = DiagnosticBag::new();
/// assert!(diagnostics.is_empty());
/// assert!(EmbeddingConfig::default().validate_interop_attributes);
/// ```
pub mod prelude;

/// Metadata vocabulary shared by all embedded definitions
///
/// Flag constants and bitflags for type, field, method, parameter, property and event
/// attributes, constant values, marshalling descriptors, custom attribute values and the
/// catalog of interop attributes and their well-known constructors.
pub mod metadata;

/// The NoPIA embedding subsystem
///
/// See [`embed::EmbeddedTypesManager`] for the entry point.
pub mod embed;

/// `nopia` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `nopia` Error type
///
/// See [`Error`] for the error categories. Interop problems are not errors but
/// [`embed::Diagnostic`]s.
pub use error::Error;

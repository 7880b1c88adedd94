//! NoPIA type embedding.
//!
//! When a compilation references a primary interop assembly with "embed interop types", the
//! interop types it uses are not referenced at runtime. Instead, the minimal shape of every
//! used COM interface, struct, enum and delegate is copied into the output module and marked
//! with `TypeIdentifierAttribute`, so that the runtime can unify the local copy with the
//! original type (type equivalence).
//!
//! This module implements that copying, independent of how a compiler represents symbols:
//!
//! - [`EmbeddingBinding`] and the `*Symbol` traits describe the compiler's symbols
//! - [`EmbeddedTypesManager`] embeds types and members on demand and freezes the result
//! - [`EmbeddedType`], [`EmbeddedField`], [`EmbeddedMethod`], [`EmbeddedProperty`],
//!   [`EmbeddedEvent`], [`EmbeddedParameter`] and [`EmbeddedTypeParameter`] are the
//!   definitions handed to the metadata writer
//! - [`VtblGap`] keeps vtable slots of partially embedded COM interfaces aligned
//! - [`Diagnostic`] and [`DiagnosticBag`] carry interop problems found along the way
//!
//! # Lifecycle
//!
//! 1. Code generation calls [`EmbeddedTypesManager::embed_method_if_need_to`] (and the field,
//!    property, event and type variants) for every member it references, from any number of
//!    threads. Members of types that are not linked pass through as [`MemberReference::Underlying`].
//! 2. Emission calls [`EmbeddedTypesManager::get_types`] once, which freezes and sorts the type
//!    set and reports name collisions.
//! 3. The metadata writer reads the member lists and attribute sets of every frozen type.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::HashSet;
//! use nopia::embed::{DiagnosticBag, EmbeddedTypesManager, EmbeddingConfig, Location};
//!
//! let manager = EmbeddedTypesManager::new(binding, EmbeddingConfig::default());
//! let diagnostics = DiagnosticBag::new();
//!
//! let reference = manager.embed_method_if_need_to(&method, &Location::None, &diagnostics)?;
//! assert!(reference.is_embedded());
//!
//! for ty in manager.get_types(&diagnostics, &HashSet::new()).iter() {
//!     for slot in ty.methods()?.iter() {
//!         println!("{}::{}", ty.qualified_name(), slot.name());
//!     }
//! }
//! ```

mod binding;
mod config;
mod copier;
mod diagnostics;
mod event;
mod field;
mod identity;
mod lazy;
mod manager;
mod member;
mod method;
mod parameter;
mod property;
mod reference;
mod typeparam;
mod types;
mod vtblgap;

pub use binding::{
    EmbeddingBinding, EventSymbol, FieldSymbol, MethodSymbol, ParameterSymbol, PropertySymbol,
    TypeKind, TypeLayout, TypeParameterSymbol, TypeSymbol,
};
pub use config::EmbeddingConfig;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCode, DiagnosticSeverity, Location};
pub use event::EmbeddedEvent;
pub use field::EmbeddedField;
pub use identity::{IdentityMap, SymbolKey};
pub use lazy::PublishOnce;
pub use manager::EmbeddedTypesManager;
pub use member::EmbeddedMember;
pub use method::{EmbeddedMethod, EmptyBody};
pub use parameter::EmbeddedParameter;
pub use property::EmbeddedProperty;
pub use reference::{
    EventReference, FieldReference, MemberReference, MethodReference, PropertyReference,
};
pub use typeparam::EmbeddedTypeParameter;
pub use types::{EmbeddedType, MethodSlot};
pub use vtblgap::VtblGap;

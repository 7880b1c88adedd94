//! Results of the embed operations.
//!
//! Compiled code refers to a member either through its underlying symbol (the member is not
//! linked, or cannot be embedded) or through its embedded definition. A [`MemberReference`]
//! is what the embed operations hand back to the code generator.

use std::{fmt, sync::Arc};

use crate::embed::{
    binding::EmbeddingBinding, event::EmbeddedEvent, field::EmbeddedField,
    method::EmbeddedMethod, property::EmbeddedProperty,
};

/// Either the original symbol or its embedded definition
pub enum MemberReference<S, E> {
    /// The member is referenced as-is
    Underlying(Arc<S>),
    /// The member was embedded
    Embedded(Arc<E>),
}

impl<S, E> MemberReference<S, E> {
    /// Returns true if the member was embedded
    pub fn is_embedded(&self) -> bool {
        matches!(self, MemberReference::Embedded(_))
    }

    /// The embedded definition, if any
    pub fn embedded(&self) -> Option<&Arc<E>> {
        match self {
            MemberReference::Embedded(embedded) => Some(embedded),
            MemberReference::Underlying(_) => None,
        }
    }

    /// The original symbol, if the member was not embedded
    pub fn underlying(&self) -> Option<&Arc<S>> {
        match self {
            MemberReference::Underlying(symbol) => Some(symbol),
            MemberReference::Embedded(_) => None,
        }
    }

    /// Consume the reference, returning the embedded definition if any
    pub fn into_embedded(self) -> Option<Arc<E>> {
        match self {
            MemberReference::Embedded(embedded) => Some(embedded),
            MemberReference::Underlying(_) => None,
        }
    }
}

impl<S, E> Clone for MemberReference<S, E> {
    fn clone(&self) -> Self {
        match self {
            MemberReference::Underlying(symbol) => MemberReference::Underlying(symbol.clone()),
            MemberReference::Embedded(embedded) => MemberReference::Embedded(embedded.clone()),
        }
    }
}

impl<S, E: fmt::Debug> fmt::Debug for MemberReference<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberReference::Underlying(_) => f.write_str("Underlying"),
            MemberReference::Embedded(embedded) => {
                f.debug_tuple("Embedded").field(embedded).finish()
            }
        }
    }
}

/// Reference to a field
pub type FieldReference<B> = MemberReference<<B as EmbeddingBinding>::Field, EmbeddedField<B>>;
/// Reference to a method
pub type MethodReference<B> = MemberReference<<B as EmbeddingBinding>::Method, EmbeddedMethod<B>>;
/// Reference to a property
pub type PropertyReference<B> =
    MemberReference<<B as EmbeddingBinding>::Property, EmbeddedProperty<B>>;
/// Reference to an event
pub type EventReference<B> = MemberReference<<B as EmbeddingBinding>::Event, EmbeddedEvent<B>>;

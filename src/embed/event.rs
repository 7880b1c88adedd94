//! Embedded events.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    embed::{
        binding::{EmbeddingBinding, EventSymbol},
        copier,
        diagnostics::DiagnosticBag,
        member::EmbeddedMember,
        method::EmbeddedMethod,
        types::EmbeddedType,
    },
    metadata::{
        customattributes::SynthesizedAttribute,
        flags::{EventAttributes, Visibility},
    },
    Result,
};

/// An event of an embedded type
///
/// An event is embedded together with its accessors; the containing type is the one of
/// whichever accessor exists, the adder first.
pub struct EmbeddedEvent<B: EmbeddingBinding> {
    member: EmbeddedMember<B, B::Event>,
    adder: Option<Arc<EmbeddedMethod<B>>>,
    remover: Option<Arc<EmbeddedMethod<B>>>,
    com_event_binding_done: AtomicBool,
}

impl<B: EmbeddingBinding> EmbeddedEvent<B> {
    /// # Errors
    /// Returns [`crate::Error::Unreachable`] if neither accessor is given.
    pub(crate) fn new(
        symbol: Arc<B::Event>,
        adder: Option<Arc<EmbeddedMethod<B>>>,
        remover: Option<Arc<EmbeddedMethod<B>>>,
    ) -> Result<Self> {
        let containing_type = match adder.as_ref().or(remover.as_ref()) {
            Some(accessor) => accessor.containing_type().clone(),
            None => {
                return Err(unreachable_error!(
                    "Event {} has neither adder nor remover",
                    symbol.name()
                ))
            }
        };

        Ok(EmbeddedEvent {
            member: EmbeddedMember::new(symbol, containing_type),
            adder,
            remover,
            com_event_binding_done: AtomicBool::new(false),
        })
    }

    /// The underlying event symbol
    pub fn symbol(&self) -> &Arc<B::Event> {
        self.member.symbol()
    }

    /// The embedded type declaring this event
    pub fn containing_type(&self) -> &Arc<EmbeddedType<B>> {
        self.member.containing_type()
    }

    /// Event name
    pub fn name(&self) -> &str {
        self.symbol().name()
    }

    /// Raw `EventAttributes`
    pub fn flags(&self) -> u32 {
        self.symbol().flags()
    }

    /// Returns true for special-name events
    pub fn is_special_name(&self) -> bool {
        self.flags() & EventAttributes::SPECIAL_NAME != 0
    }

    /// Returns true for runtime special-name events
    pub fn is_rt_special_name(&self) -> bool {
        self.flags() & EventAttributes::RTSPECIAL_NAME != 0
    }

    /// Delegate type of the event
    pub fn event_type(&self) -> B::TypeRef {
        self.symbol().event_type()
    }

    /// Embedded add accessor
    pub fn adder(&self) -> Option<&Arc<EmbeddedMethod<B>>> {
        self.adder.as_ref()
    }

    /// Embedded remove accessor
    pub fn remover(&self) -> Option<&Arc<EmbeddedMethod<B>>> {
        self.remover.as_ref()
    }

    /// All embedded accessors, adder first
    pub fn accessors(&self) -> impl Iterator<Item = &Arc<EmbeddedMethod<B>>> {
        self.adder.iter().chain(self.remover.iter())
    }

    /// Accessibility of the event, the widest of its accessors
    pub fn visibility(&self) -> Visibility {
        self.accessors()
            .map(|accessor| accessor.visibility())
            .fold(Visibility::CompilerControlled, Visibility::widest)
    }

    /// Returns true once the source interface methods of this event have been embedded
    pub fn is_bound_to_com_event_interface(&self) -> bool {
        self.com_event_binding_done.load(Ordering::Acquire)
    }

    /// Claim the COM event binding of this event; true for exactly one caller
    pub(crate) fn claim_com_event_binding(&self) -> bool {
        self.com_event_binding_done
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Custom attributes of the embedded event, computed on first access
    ///
    /// # Errors
    /// Returns [`crate::Error::ManagerReleased`] if the manager has been dropped.
    pub fn attributes(&self, diagnostics: &DiagnosticBag) -> Result<&[SynthesizedAttribute]> {
        let symbol = self.symbol();
        self.member.attributes_with(diagnostics, |manager, local| {
            copier::member_attributes(
                manager.binding(),
                &symbol.attributes(),
                &symbol.location(),
                local,
            )
        })
    }
}

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedEvent<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedEvent")
            .field("name", &self.name())
            .field("adder", &self.adder.as_ref().map(|m| m.name().to_string()))
            .field("remover", &self.remover.as_ref().map(|m| m.name().to_string()))
            .field("com_event_binding_done", &self.is_bound_to_com_event_interface())
            .finish()
    }
}

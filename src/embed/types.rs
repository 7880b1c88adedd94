//! Embedded types.
//!
//! An [`EmbeddedType`] is the local copy of one linked interop type. It is created the first
//! time compiled code references the type or one of its members, collects its attribute set
//! (eagerly, by the caller that created it) and, once the manager has frozen the type set,
//! materializes its field, method, property and event lists from the members that were
//! embedded in the meantime.
//!
//! # Method lists and vtable gaps
//!
//! COM clients call interface methods by vtable slot. When only some methods of an interface
//! are embedded, every run of skipped methods is replaced by a [`VtblGap`] of the same size,
//! so that each embedded method keeps its slot. Trailing skipped methods need no gap.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, OnceLock, Weak,
    },
};

use log::trace;

use crate::{
    embed::{
        binding::{EmbeddingBinding, TypeKind, TypeLayout, TypeSymbol},
        copier,
        diagnostics::{DiagnosticBag, Location},
        event::EmbeddedEvent,
        field::EmbeddedField,
        lazy::PublishOnce,
        manager::EmbeddedTypesManager,
        method::EmbeddedMethod,
        property::EmbeddedProperty,
        vtblgap::VtblGap,
    },
    metadata::{customattributes::SynthesizedAttribute, flags::TypeAttributes},
    Error, Result,
};

/// An entry of the method list of an embedded type
pub enum MethodSlot<B: EmbeddingBinding> {
    /// An embedded method
    Method(Arc<EmbeddedMethod<B>>),
    /// Placeholder for a run of vtable slots without an embedded method
    Gap(VtblGap),
}

impl<B: EmbeddingBinding> MethodSlot<B> {
    /// Method name of the slot
    pub fn name(&self) -> &str {
        match self {
            MethodSlot::Method(method) => method.name(),
            MethodSlot::Gap(gap) => gap.name(),
        }
    }

    /// The embedded method, if this slot is not a gap
    pub fn as_method(&self) -> Option<&Arc<EmbeddedMethod<B>>> {
        match self {
            MethodSlot::Method(method) => Some(method),
            MethodSlot::Gap(_) => None,
        }
    }

    /// The gap, if this slot is one
    pub fn as_gap(&self) -> Option<&VtblGap> {
        match self {
            MethodSlot::Method(_) => None,
            MethodSlot::Gap(gap) => Some(gap),
        }
    }

    /// Number of vtable slots this entry occupies
    pub fn slot_count(&self) -> u32 {
        match self {
            MethodSlot::Method(_) => 1,
            MethodSlot::Gap(gap) => gap.size(),
        }
    }
}

impl<B: EmbeddingBinding> fmt::Debug for MethodSlot<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodSlot::Method(method) => write!(f, "Method({})", method.name()),
            MethodSlot::Gap(gap) => write!(f, "Gap({gap})"),
        }
    }
}

/// The local copy of a linked interop type
///
/// Embedded types are compared by identity (`Arc::ptr_eq`); two embedded types may describe
/// structurally identical types from different assemblies.
pub struct EmbeddedType<B: EmbeddingBinding> {
    symbol: Arc<B::Type>,
    manager: Weak<EmbeddedTypesManager<B>>,
    assembly_ref_index: OnceLock<usize>,
    attributes: PublishOnce<Vec<SynthesizedAttribute>>,
    all_members_embedded: AtomicBool,
    fields: OnceLock<Arc<[Arc<EmbeddedField<B>>]>>,
    methods: OnceLock<Arc<[MethodSlot<B>]>>,
    properties: OnceLock<Arc<[Arc<EmbeddedProperty<B>>]>>,
    events: OnceLock<Arc<[Arc<EmbeddedEvent<B>>]>>,
}

impl<B: EmbeddingBinding> EmbeddedType<B> {
    pub(crate) fn new(manager: Weak<EmbeddedTypesManager<B>>, symbol: Arc<B::Type>) -> Self {
        EmbeddedType {
            symbol,
            manager,
            assembly_ref_index: OnceLock::new(),
            attributes: PublishOnce::new(),
            all_members_embedded: AtomicBool::new(false),
            fields: OnceLock::new(),
            methods: OnceLock::new(),
            properties: OnceLock::new(),
            events: OnceLock::new(),
        }
    }

    /// The underlying type symbol
    pub fn symbol(&self) -> &Arc<B::Type> {
        &self.symbol
    }

    /// The manager owning this type
    ///
    /// # Errors
    /// Returns [`Error::ManagerReleased`] if the manager has been dropped.
    pub fn manager(&self) -> Result<Arc<EmbeddedTypesManager<B>>> {
        self.manager.upgrade().ok_or(Error::ManagerReleased)
    }

    /// Simple metadata name
    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    /// Namespace, empty for the global namespace
    pub fn namespace(&self) -> &str {
        self.symbol.namespace()
    }

    /// Namespace-qualified name
    pub fn qualified_name(&self) -> String {
        self.symbol.qualified_name()
    }

    /// Raw `TypeAttributes` of the underlying type
    pub fn flags(&self) -> u32 {
        self.symbol.flags()
    }

    /// Kind of the type
    pub fn kind(&self) -> TypeKind {
        self.symbol.kind()
    }

    /// Returns true for interfaces
    pub fn is_interface(&self) -> bool {
        self.symbol.is_interface()
    }

    /// Returns true for `ComImport` types
    pub fn is_com_import(&self) -> bool {
        self.symbol.is_com_import()
    }

    /// Returns true for abstract types
    pub fn is_abstract(&self) -> bool {
        self.flags() & TypeAttributes::ABSTRACT != 0
    }

    /// Returns true for sealed types
    pub fn is_sealed(&self) -> bool {
        self.flags() & TypeAttributes::SEALED != 0
    }

    /// Explicit layout of a value type
    pub fn layout(&self) -> Option<TypeLayout> {
        self.symbol.layout()
    }

    /// Base class
    pub fn base_class(&self) -> Option<B::TypeRef> {
        self.symbol.base_type()
    }

    /// Implemented interfaces, as underlying symbols
    pub fn interfaces(&self) -> Vec<Arc<B::Type>> {
        self.symbol.interfaces()
    }

    /// Index of the assembly reference the type comes from
    ///
    /// # Errors
    /// Returns [`Error::ManagerReleased`] if the index has not been computed yet and the
    /// manager has been dropped.
    pub fn assembly_ref_index(&self) -> Result<usize> {
        if let Some(index) = self.assembly_ref_index.get() {
            return Ok(*index);
        }
        let manager = self.manager()?;
        Ok(self.assembly_ref_index_with(manager.binding()))
    }

    pub(crate) fn assembly_ref_index_with(&self, binding: &B) -> usize {
        *self
            .assembly_ref_index
            .get_or_init(|| binding.assembly_ref_index(&self.symbol))
    }

    /// Custom attributes of the embedded type, computed on first access.
    ///
    /// The creating caller computes them right away, so this normally returns the cached set.
    ///
    /// # Errors
    /// Returns [`Error::ManagerReleased`] if the manager has been dropped.
    pub fn attributes(
        self: &Arc<Self>,
        diagnostics: &DiagnosticBag,
    ) -> Result<&[SynthesizedAttribute]> {
        if let Some(attributes) = self.attributes.get() {
            return Ok(attributes);
        }
        let manager = self.manager()?;
        Ok(self.attributes_with(&manager, &Location::None, diagnostics))
    }

    pub(crate) fn attributes_with(
        self: &Arc<Self>,
        manager: &EmbeddedTypesManager<B>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> &[SynthesizedAttribute] {
        let (attributes, published) = self
            .attributes
            .get_or_publish(|local| copier::type_attributes(manager, self, location, local));
        if let Some(local) = published {
            manager.forward(&local, diagnostics);
        }
        attributes
    }

    /// Claim embedding every member of this interface; true for exactly one caller
    pub(crate) fn claim_all_members(&self) -> bool {
        self.all_members_embedded
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Embedded fields, in emission order
    ///
    /// # Errors
    /// Returns [`Error::NotFrozen`] before the type set is frozen and
    /// [`Error::ManagerReleased`] if the manager has been dropped.
    pub fn fields(&self) -> Result<Arc<[Arc<EmbeddedField<B>>]>> {
        if let Some(fields) = self.fields.get() {
            return Ok(fields.clone());
        }
        let manager = self.frozen_manager()?;

        let fields: Arc<[_]> = self
            .symbol
            .fields()
            .iter()
            .filter_map(|field| manager.embedded_field(field))
            .collect();
        Ok(self.fields.get_or_init(|| fields).clone())
    }

    /// Embedded methods and vtable gaps, in emission order
    ///
    /// # Errors
    /// Returns [`Error::NotFrozen`] before the type set is frozen and
    /// [`Error::ManagerReleased`] if the manager has been dropped.
    pub fn methods(&self) -> Result<Arc<[MethodSlot<B>]>> {
        if let Some(methods) = self.methods.get() {
            return Ok(methods.clone());
        }
        let manager = self.frozen_manager()?;

        let mut slots = Vec::new();
        let mut gap_ordinal = 0;
        let mut gap_size = 0;
        let mut leading = true;
        for method in self.symbol.methods() {
            let Some(method) = method else {
                // Placeholders ahead of the first method do not open a gap.
                if !leading {
                    gap_size += 1;
                }
                continue;
            };
            leading = false;
            match manager.embedded_method(&method) {
                Some(embedded) => {
                    if gap_size > 0 {
                        gap_ordinal += 1;
                        trace!(
                            "{}: vtable gap {} of {} slot(s)",
                            self.qualified_name(),
                            gap_ordinal,
                            gap_size
                        );
                        slots.push(MethodSlot::Gap(VtblGap::new(gap_ordinal, gap_size)));
                        gap_size = 0;
                    }
                    slots.push(MethodSlot::Method(embedded));
                }
                None => gap_size += 1,
            }
        }

        let slots: Arc<[_]> = slots.into();
        Ok(self.methods.get_or_init(|| slots).clone())
    }

    /// Embedded properties, in emission order
    ///
    /// # Errors
    /// Returns [`Error::NotFrozen`] before the type set is frozen and
    /// [`Error::ManagerReleased`] if the manager has been dropped.
    pub fn properties(&self) -> Result<Arc<[Arc<EmbeddedProperty<B>>]>> {
        if let Some(properties) = self.properties.get() {
            return Ok(properties.clone());
        }
        let manager = self.frozen_manager()?;

        let properties: Arc<[_]> = self
            .symbol
            .properties()
            .iter()
            .filter_map(|property| manager.embedded_property(property))
            .collect();
        Ok(self.properties.get_or_init(|| properties).clone())
    }

    /// Embedded events, in emission order
    ///
    /// # Errors
    /// Returns [`Error::NotFrozen`] before the type set is frozen and
    /// [`Error::ManagerReleased`] if the manager has been dropped.
    pub fn events(&self) -> Result<Arc<[Arc<EmbeddedEvent<B>>]>> {
        if let Some(events) = self.events.get() {
            return Ok(events.clone());
        }
        let manager = self.frozen_manager()?;

        let events: Arc<[_]> = self
            .symbol
            .events()
            .iter()
            .filter_map(|event| manager.embedded_event(event))
            .collect();
        Ok(self.events.get_or_init(|| events).clone())
    }

    fn frozen_manager(&self) -> Result<Arc<EmbeddedTypesManager<B>>> {
        let manager = self.manager()?;
        if manager.is_frozen() {
            Ok(manager)
        } else {
            Err(Error::NotFrozen)
        }
    }
}

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedType<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedType")
            .field("name", &self.qualified_name())
            .field("kind", &self.kind())
            .field("assembly_ref_index", &self.assembly_ref_index.get())
            .field("attributes_computed", &self.attributes.is_published())
            .finish()
    }
}

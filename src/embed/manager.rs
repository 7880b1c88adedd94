//! The orchestrator of the embedding process.
//!
//! [`EmbeddedTypesManager`] owns every embedded definition of one compilation. Code generation
//! calls the `embed_*_if_need_to` operations for each member it references; members of types
//! that are not linked pass through untouched, members of linked types are embedded together
//! with their containing type. Once code generation is done, [`EmbeddedTypesManager::get_types`]
//! freezes the type set, sorts it into its emission order and reports name collisions.
//!
//! # Diagnostics
//!
//! Every public operation reports into a private bag first and hands the content to the
//! caller's bag through the configured severity policy. Lazily computed state that several
//! threads may race on (attribute sets, the frozen list) only forwards the diagnostics of the
//! computation that got published.
//!
//! # Concurrency
//!
//! All operations take `&self` and may be called from any number of threads. Get-or-create is
//! linearizable: concurrent callers for the same symbol all receive the same embedded
//! definition, and the follow-up work of a new definition (embedding its members, accessors or
//! base interfaces) is done by the caller whose definition got registered.

use std::{
    cmp::Ordering,
    collections::HashSet,
    fmt,
    sync::{Arc, Weak},
};

use dashmap::DashMap;
use log::{debug, trace, warn};

use crate::{
    embed::{
        binding::{
            EmbeddingBinding, EventSymbol, FieldSymbol, MethodSymbol, PropertySymbol, TypeKind,
            TypeSymbol,
        },
        config::EmbeddingConfig,
        diagnostics::{DiagnosticBag, DiagnosticCode, Location},
        event::EmbeddedEvent,
        field::EmbeddedField,
        identity::{IdentityMap, SymbolKey},
        lazy::PublishOnce,
        method::EmbeddedMethod,
        property::EmbeddedProperty,
        reference::{
            EventReference, FieldReference, MemberReference, MethodReference, PropertyReference,
        },
        types::EmbeddedType,
    },
    metadata::{
        customattributes::AttributeDescription,
        flags::{FieldAttributes, MethodModifiers},
    },
    Result,
};

/// Owner of all embedded definitions of a compilation
pub struct EmbeddedTypesManager<B: EmbeddingBinding> {
    this: Weak<EmbeddedTypesManager<B>>,
    binding: B,
    config: EmbeddingConfig,
    types: IdentityMap<B::Type, EmbeddedType<B>>,
    fields: IdentityMap<B::Field, EmbeddedField<B>>,
    methods: IdentityMap<B::Method, EmbeddedMethod<B>>,
    properties: IdentityMap<B::Property, EmbeddedProperty<B>>,
    events: IdentityMap<B::Event, EmbeddedEvent<B>>,
    /// Normalized assembly GUIDs, by assembly reference index
    assembly_guids: DashMap<usize, Arc<str>>,
    frozen: PublishOnce<Arc<[Arc<EmbeddedType<B>>]>>,
}

impl<B: EmbeddingBinding> EmbeddedTypesManager<B> {
    /// Create a manager over `binding`.
    ///
    /// Embedded definitions keep a weak back reference to their manager, hence the `Arc`.
    pub fn new(binding: B, config: EmbeddingConfig) -> Arc<Self> {
        Arc::new_cyclic(|this| EmbeddedTypesManager {
            this: this.clone(),
            binding,
            config,
            types: IdentityMap::new(),
            fields: IdentityMap::new(),
            methods: IdentityMap::new(),
            properties: IdentityMap::new(),
            events: IdentityMap::new(),
            assembly_guids: DashMap::new(),
            frozen: PublishOnce::new(),
        })
    }

    /// The symbol binding
    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// The embedding configuration
    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Returns true once [`EmbeddedTypesManager::get_types`] has published the type set
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_published()
    }

    /// Number of embedded types
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// The embedded definition of `symbol`, if it was embedded
    pub fn embedded_type(&self, symbol: &Arc<B::Type>) -> Option<Arc<EmbeddedType<B>>> {
        self.types.get(symbol)
    }

    /// The embedded definition of `symbol`, if it was embedded
    pub fn embedded_field(&self, symbol: &Arc<B::Field>) -> Option<Arc<EmbeddedField<B>>> {
        self.fields.get(symbol)
    }

    /// The embedded definition of `symbol`, if it was embedded
    pub fn embedded_method(&self, symbol: &Arc<B::Method>) -> Option<Arc<EmbeddedMethod<B>>> {
        self.methods.get(symbol)
    }

    /// The embedded definition of `symbol`, if it was embedded
    pub fn embedded_property(
        &self,
        symbol: &Arc<B::Property>,
    ) -> Option<Arc<EmbeddedProperty<B>>> {
        self.properties.get(symbol)
    }

    /// The embedded definition of `symbol`, if it was embedded
    pub fn embedded_event(&self, symbol: &Arc<B::Event>) -> Option<Arc<EmbeddedEvent<B>>> {
        self.events.get(symbol)
    }

    /// Embed `symbol` if it comes from a linked assembly.
    ///
    /// Returns `None` if the type is not linked, is a class, or fails validation (nested,
    /// generic, or an interface with non-abstract members; the latter are reported at
    /// `location`). `from_implements` marks a type reached as an implemented interface: all
    /// members of such an interface are embedded. A struct with methods, static fields or
    /// non-public fields is embedded, but reported at `location` when it is first embedded.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unreachable`] if a new type would be embedded after the type set
    /// was frozen.
    pub fn embed_type_if_need_to(
        &self,
        symbol: &Arc<B::Type>,
        from_implements: bool,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<Option<Arc<EmbeddedType<B>>>> {
        let local = DiagnosticBag::new();
        let result = self.embed_type(symbol, from_implements, location, &local);
        self.forward(&local, diagnostics);
        result
    }

    /// Embed `symbol` if its containing type is linked
    ///
    /// # Errors
    /// Returns [`crate::Error::Unreachable`] on structurally impossible states.
    pub fn embed_field_if_need_to(
        &self,
        symbol: &Arc<B::Field>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<FieldReference<B>> {
        let local = DiagnosticBag::new();
        let result = self.embed_field_reference(symbol, location, &local);
        self.forward(&local, diagnostics);
        result
    }

    /// Embed `symbol` if its containing type is linked.
    ///
    /// Methods of value types are embedded, but reported: embedded interop structs may
    /// only contain fields.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unreachable`] on structurally impossible states.
    pub fn embed_method_if_need_to(
        &self,
        symbol: &Arc<B::Method>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<MethodReference<B>> {
        let local = DiagnosticBag::new();
        let result = self.embed_method_reference(symbol, location, &local);
        self.forward(&local, diagnostics);
        result
    }

    /// Embed `symbol` and its accessors if the containing type is linked
    ///
    /// # Errors
    /// Returns [`crate::Error::Unreachable`] on structurally impossible states.
    pub fn embed_property_if_need_to(
        &self,
        symbol: &Arc<B::Property>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<PropertyReference<B>> {
        let local = DiagnosticBag::new();
        let result = self.embed_property_reference(symbol, location, &local);
        self.forward(&local, diagnostics);
        result
    }

    /// Embed `symbol` and its accessors if the containing type is linked.
    ///
    /// With `is_used_for_com_aware_event_binding`, the methods of the COM source interface
    /// that back the event are embedded as well, and a missing source interface or source
    /// method is reported.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unreachable`] on structurally impossible states.
    pub fn embed_event_if_need_to(
        &self,
        symbol: &Arc<B::Event>,
        location: &Location,
        diagnostics: &DiagnosticBag,
        is_used_for_com_aware_event_binding: bool,
    ) -> Result<EventReference<B>> {
        let local = DiagnosticBag::new();
        let result = self.embed_event_reference(
            symbol,
            is_used_for_com_aware_event_binding,
            location,
            &local,
        );
        self.forward(&local, diagnostics);
        result
    }

    /// Freeze the type set and return it in emission order.
    ///
    /// The types are ordered by namespace, name and assembly reference index. The first call
    /// reports types sharing a name (once per group), types clashing with a top-level type in
    /// `names_of_top_level_types` and, if configured, indirect references to the contributing
    /// linked assemblies. Later calls return the same list and report nothing.
    pub fn get_types(
        &self,
        diagnostics: &DiagnosticBag,
        names_of_top_level_types: &HashSet<String>,
    ) -> Arc<[Arc<EmbeddedType<B>>]> {
        let (types, published) = self
            .frozen
            .get_or_publish(|local| self.freeze(local, names_of_top_level_types));
        if let Some(local) = published {
            self.forward(&local, diagnostics);
        }
        types.clone()
    }

    /// Hand the content of `local` to `target` through the severity policy
    pub(crate) fn forward(&self, local: &DiagnosticBag, target: &DiagnosticBag) {
        target.extend_from(local, |diagnostic| self.config.apply(diagnostic));
    }

    /// The `TypeIdentifier` scope of types from the assembly `symbol` comes from
    pub(crate) fn assembly_guid_string(&self, symbol: &B::Type) -> Arc<str> {
        let index = self.binding.assembly_ref_index(symbol);
        if let Some(guid) = self.assembly_guids.get(&index) {
            return guid.value().clone();
        }

        let guid: Arc<str> = match self.binding.assembly_guid(symbol) {
            Some(raw) => {
                let raw = raw.trim();
                match uguid::Guid::try_parse(raw) {
                    Ok(guid) => guid.to_string().into(),
                    Err(_) => raw.into(),
                }
            }
            None => "".into(),
        };
        self.assembly_guids.entry(index).or_insert(guid).value().clone()
    }

    /// Embed the members of `ty` named by its `DefaultMemberAttribute`
    pub(crate) fn embed_default_members(
        &self,
        ty: &Arc<EmbeddedType<B>>,
        member_name: &str,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) {
        let symbol = ty.symbol();
        let mut results = Vec::new();

        for field in symbol.fields().iter().filter(|f| f.name() == member_name) {
            results.push(self.embed_field_in(ty, field).map(drop));
        }
        for method in symbol
            .methods()
            .iter()
            .flatten()
            .filter(|m| m.name() == member_name)
        {
            results.push(self.embed_method_in(ty, method, location, diagnostics).map(drop));
        }
        for property in symbol
            .properties()
            .iter()
            .filter(|p| p.name() == member_name)
        {
            results.push(
                self.embed_property_in(ty, property, location, diagnostics)
                    .map(drop),
            );
        }
        for event in symbol.events().iter().filter(|e| e.name() == member_name) {
            results.push(
                self.embed_event_in(ty, event, false, location, diagnostics)
                    .map(drop),
            );
        }

        for error in results.into_iter().filter_map(std::result::Result::err) {
            warn!(
                "Default member {} of {} not embedded: {}",
                member_name,
                ty.qualified_name(),
                error
            );
        }
    }

    fn embed_type(
        &self,
        symbol: &Arc<B::Type>,
        from_implements: bool,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<Option<Arc<EmbeddedType<B>>>> {
        Ok(self
            .embed_type_entry(symbol, from_implements, location, diagnostics)?
            .map(|(ty, _)| ty))
    }

    /// Embedded type and whether this call created it
    fn embed_type_entry(
        &self,
        symbol: &Arc<B::Type>,
        from_implements: bool,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<Option<(Arc<EmbeddedType<B>>, bool)>> {
        if !symbol.kind().is_embeddable() || !self.binding.is_embeddable(symbol) {
            trace!("{} is not embedded", symbol.qualified_name());
            return Ok(None);
        }
        if !self.is_valid_embeddable_type(symbol, location, diagnostics) {
            return Ok(None);
        }

        let (ty, created) = self.types.get_or_try_insert_with(symbol, || {
            if self.is_frozen() {
                return Err(unreachable_error!(
                    "Type {} embedded after the type set was frozen",
                    symbol.qualified_name()
                ));
            }
            Ok(EmbeddedType::new(self.this.clone(), symbol.clone()))
        })?;

        if from_implements && ty.is_interface() && ty.claim_all_members() {
            self.embed_all_members(&ty, location, diagnostics)?;
        }

        if created {
            debug!(
                "Embedding {} {} from assembly #{}",
                ty.kind(),
                ty.qualified_name(),
                ty.assembly_ref_index_with(&self.binding)
            );
            ty.attributes_with(self, location, diagnostics);

            match ty.kind() {
                TypeKind::Struct | TypeKind::Enum => {
                    if ty.kind() == TypeKind::Struct
                        && !Self::has_only_public_instance_fields(symbol)
                    {
                        diagnostics.report(
                            DiagnosticCode::InteropStructContainsMethods,
                            location.clone(),
                            vec![ty.qualified_name()],
                        );
                    }
                    for field in symbol.fields() {
                        self.embed_field_in(&ty, &field)?;
                    }
                    for method in symbol.methods().into_iter().flatten() {
                        self.embed_method_in(&ty, &method, location, diagnostics)?;
                    }
                }
                TypeKind::Interface => {
                    for interface in symbol.interfaces() {
                        self.embed_type(&interface, true, location, diagnostics)?;
                    }
                }
                TypeKind::Delegate => {
                    for method in symbol.methods().into_iter().flatten() {
                        self.embed_method_in(&ty, &method, location, diagnostics)?;
                    }
                }
                TypeKind::Class => {}
            }
        }

        Ok(Some((ty, created)))
    }

    fn is_valid_embeddable_type(
        &self,
        symbol: &B::Type,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> bool {
        let code = if symbol.is_nested() {
            DiagnosticCode::NoPiaNestedType
        } else if symbol.is_generic() {
            DiagnosticCode::GenericsUsedInNoPiaType
        } else if symbol.kind() == TypeKind::Interface
            && symbol.methods().iter().flatten().any(|method| {
                !MethodModifiers::from_method_flags(method.flags())
                    .contains(MethodModifiers::ABSTRACT)
            })
        {
            DiagnosticCode::DefaultInterfaceImplementationInNoPiaType
        } else {
            return true;
        };

        diagnostics.report(code, location.clone(), vec![symbol.qualified_name()]);
        false
    }

    /// Interop structs may only carry public instance fields
    fn has_only_public_instance_fields(symbol: &B::Type) -> bool {
        symbol.methods().iter().all(Option::is_none)
            && symbol.fields().iter().all(|field| {
                let flags = field.flags();
                flags & FieldAttributes::FIELD_ACCESS_MASK == FieldAttributes::PUBLIC
                    && flags & FieldAttributes::STATIC == 0
            })
    }

    /// Embed every method, property and event of an interface reached through `implements`
    fn embed_all_members(
        &self,
        ty: &Arc<EmbeddedType<B>>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<()> {
        let symbol = ty.symbol();
        for method in symbol.methods().into_iter().flatten() {
            self.embed_method_in(ty, &method, location, diagnostics)?;
        }
        for property in symbol.properties() {
            if property.getter().is_some() || property.setter().is_some() {
                self.embed_property_in(ty, &property, location, diagnostics)?;
            }
        }
        for event in symbol.events() {
            if event.adder().is_some() || event.remover().is_some() {
                self.embed_event_in(ty, &event, false, location, diagnostics)?;
            }
        }
        Ok(())
    }

    fn embed_field_reference(
        &self,
        symbol: &Arc<B::Field>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<FieldReference<B>> {
        match self.embed_type(&symbol.containing_type(), false, location, diagnostics)? {
            Some(ty) => Ok(MemberReference::Embedded(self.embed_field_in(&ty, symbol)?)),
            None => Ok(MemberReference::Underlying(symbol.clone())),
        }
    }

    fn embed_method_reference(
        &self,
        symbol: &Arc<B::Method>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<MethodReference<B>> {
        let Some((ty, created)) =
            self.embed_type_entry(&symbol.containing_type(), false, location, diagnostics)?
        else {
            return Ok(MemberReference::Underlying(symbol.clone()));
        };

        // Creating a struct already reported its methods at this location.
        let reported = created && ty.kind() == TypeKind::Struct;
        if matches!(ty.kind(), TypeKind::Struct | TypeKind::Enum) && !reported {
            diagnostics.report(
                DiagnosticCode::InteropStructContainsMethods,
                location.clone(),
                vec![ty.qualified_name()],
            );
        }
        Ok(MemberReference::Embedded(
            self.embed_method_in(&ty, symbol, location, diagnostics)?,
        ))
    }

    fn embed_property_reference(
        &self,
        symbol: &Arc<B::Property>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<PropertyReference<B>> {
        let Some(accessor) = symbol.getter().or_else(|| symbol.setter()) else {
            trace!("Property {} has no accessor, not embedded", symbol.name());
            return Ok(MemberReference::Underlying(symbol.clone()));
        };

        match self.embed_type(&accessor.containing_type(), false, location, diagnostics)? {
            Some(ty) => Ok(MemberReference::Embedded(
                self.embed_property_in(&ty, symbol, location, diagnostics)?,
            )),
            None => Ok(MemberReference::Underlying(symbol.clone())),
        }
    }

    fn embed_event_reference(
        &self,
        symbol: &Arc<B::Event>,
        is_used_for_com_aware_event_binding: bool,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<EventReference<B>> {
        if symbol.adder().is_none() && symbol.remover().is_none() {
            trace!("Event {} has no accessor, not embedded", symbol.name());
            return Ok(MemberReference::Underlying(symbol.clone()));
        }

        match self.embed_type(&symbol.containing_type(), false, location, diagnostics)? {
            Some(ty) => Ok(MemberReference::Embedded(self.embed_event_in(
                &ty,
                symbol,
                is_used_for_com_aware_event_binding,
                location,
                diagnostics,
            )?)),
            None => Ok(MemberReference::Underlying(symbol.clone())),
        }
    }

    fn embed_field_in(
        &self,
        ty: &Arc<EmbeddedType<B>>,
        symbol: &Arc<B::Field>,
    ) -> Result<Arc<EmbeddedField<B>>> {
        let (field, created) = self
            .fields
            .get_or_try_insert_with(symbol, || Ok(EmbeddedField::new(ty.clone(), symbol.clone())))?;
        if created {
            debug!("Embedding field {}.{}", ty.qualified_name(), field.name());
        }
        Ok(field)
    }

    fn embed_method_in(
        &self,
        ty: &Arc<EmbeddedType<B>>,
        symbol: &Arc<B::Method>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<Arc<EmbeddedMethod<B>>> {
        let (method, created) = self.methods.get_or_try_insert_with(symbol, || {
            Ok(EmbeddedMethod::new(ty.clone(), symbol.clone()))
        })?;

        if created {
            debug!("Embedding method {}.{}", ty.qualified_name(), method.name());

            if let Some(property) = symbol.associated_property() {
                self.embed_property_in(ty, &property, location, diagnostics)?;
            } else if let Some(event) = symbol.associated_event() {
                self.embed_event_in(ty, &event, false, location, diagnostics)?;
            }
        }
        Ok(method)
    }

    fn embed_property_in(
        &self,
        ty: &Arc<EmbeddedType<B>>,
        symbol: &Arc<B::Property>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<Arc<EmbeddedProperty<B>>> {
        if let Some(existing) = self.properties.get(symbol) {
            return Ok(existing);
        }

        let getter = symbol
            .getter()
            .map(|getter| self.embed_method_in(ty, &getter, location, diagnostics))
            .transpose()?;
        let setter = symbol
            .setter()
            .map(|setter| self.embed_method_in(ty, &setter, location, diagnostics))
            .transpose()?;

        let (property, created) = self.properties.get_or_try_insert_with(symbol, || {
            EmbeddedProperty::new(symbol.clone(), getter, setter)
        })?;
        if created {
            debug!("Embedding property {}.{}", ty.qualified_name(), property.name());
        }
        Ok(property)
    }

    fn embed_event_in(
        &self,
        ty: &Arc<EmbeddedType<B>>,
        symbol: &Arc<B::Event>,
        is_used_for_com_aware_event_binding: bool,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<Arc<EmbeddedEvent<B>>> {
        let event = match self.events.get(symbol) {
            Some(existing) => existing,
            None => {
                let adder = symbol
                    .adder()
                    .map(|adder| self.embed_method_in(ty, &adder, location, diagnostics))
                    .transpose()?;
                let remover = symbol
                    .remover()
                    .map(|remover| self.embed_method_in(ty, &remover, location, diagnostics))
                    .transpose()?;

                let (event, created) = self.events.get_or_try_insert_with(symbol, || {
                    EmbeddedEvent::new(symbol.clone(), adder, remover)
                })?;
                if created {
                    debug!("Embedding event {}.{}", ty.qualified_name(), event.name());
                }
                event
            }
        };

        self.embed_com_event_interface_methods(
            &event,
            is_used_for_com_aware_event_binding,
            location,
            diagnostics,
        )?;
        Ok(event)
    }

    /// Embed the methods of the COM source interface that back `event`.
    ///
    /// The source interface is named by the `ComEventInterfaceAttribute` of the event's
    /// containing type; methods named like the event are embedded from it and from all of its
    /// base interfaces. A COM-aware binding does this exactly once per event and reports when
    /// nothing could be found.
    fn embed_com_event_interface_methods(
        &self,
        event: &Arc<EmbeddedEvent<B>>,
        is_used_for_com_aware_event_binding: bool,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Result<()> {
        if event.is_bound_to_com_event_interface()
            || (is_used_for_com_aware_event_binding && !event.claim_com_event_binding())
        {
            return Ok(());
        }

        let containing = event.containing_type().symbol();
        let description = &AttributeDescription::COM_EVENT_INTERFACE_ATTRIBUTE;
        let Some(attribute) = containing
            .attributes()
            .into_iter()
            .find(|attribute| self.binding.is_target_attribute(attribute, description).is_some())
        else {
            return Ok(());
        };

        let source = match attribute.fixed_args() {
            [source, _] => source
                .as_type_name()
                .and_then(|name| self.binding.resolve_attribute_type(containing, name)),
            _ => None,
        };

        let mut found = false;
        if let Some(source) = &source {
            let mut visited = HashSet::new();
            let mut pending = vec![source.clone()];
            while let Some(interface) = pending.pop() {
                if !visited.insert(SymbolKey::of(&interface)) {
                    continue;
                }
                for method in interface
                    .methods()
                    .into_iter()
                    .flatten()
                    .filter(|method| method.name() == event.name())
                {
                    self.embed_method_reference(&method, location, diagnostics)?;
                    found = true;
                }
                pending.extend(interface.interfaces());
            }
        }

        if !found && is_used_for_com_aware_event_binding {
            match &source {
                Some(source) => diagnostics.report(
                    DiagnosticCode::MissingMethodOnSourceInterface,
                    location.clone(),
                    vec![
                        source.qualified_name(),
                        event.name().to_string(),
                        event.name().to_string(),
                    ],
                ),
                None => diagnostics.report(
                    DiagnosticCode::MissingSourceInterface,
                    location.clone(),
                    vec![containing.qualified_name(), event.name().to_string()],
                ),
            }
        }
        Ok(())
    }

    fn freeze(
        &self,
        diagnostics: &DiagnosticBag,
        names_of_top_level_types: &HashSet<String>,
    ) -> Arc<[Arc<EmbeddedType<B>>]> {
        let mut types = self.types.values();
        types.sort_by(|left, right| self.compare_types(left, right));

        let mut group_reported = false;
        for (index, ty) in types.iter().enumerate() {
            if names_of_top_level_types.contains(&ty.qualified_name()) {
                self.binding
                    .report_name_collision_with_already_declared_type(ty, diagnostics);
            }

            let Some(previous) = index.checked_sub(1).map(|previous| &types[previous]) else {
                continue;
            };
            if previous.namespace() == ty.namespace() && previous.name() == ty.name() {
                if !group_reported {
                    warn!(
                        "Interop type {} is contributed by more than one linked assembly",
                        ty.qualified_name()
                    );
                    self.binding
                        .report_name_collision_between_embedded_types(previous, ty, diagnostics);
                    group_reported = true;
                }
            } else {
                group_reported = false;
            }
        }

        if self.config.report_indirect_references {
            let mut assemblies = HashSet::new();
            for ty in &types {
                if assemblies.insert(ty.assembly_ref_index_with(&self.binding)) {
                    self.binding
                        .report_indirect_references_to_linked_assemblies(ty.symbol(), diagnostics);
                }
            }
        }

        debug!("Froze {} embedded type(s)", types.len());
        types.into()
    }

    fn compare_types(&self, left: &EmbeddedType<B>, right: &EmbeddedType<B>) -> Ordering {
        left.namespace()
            .cmp(right.namespace())
            .then_with(|| left.name().cmp(right.name()))
            .then_with(|| {
                left.assembly_ref_index_with(&self.binding)
                    .cmp(&right.assembly_ref_index_with(&self.binding))
            })
    }
}

impl<B: EmbeddingBinding> fmt::Debug for EmbeddedTypesManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedTypesManager")
            .field("config", &self.config)
            .field("types", &self.types.len())
            .field("fields", &self.fields.len())
            .field("methods", &self.methods.len())
            .field("properties", &self.properties.len())
            .field("events", &self.events.len())
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

//! Attribute porting for embedded definitions.
//!
//! Attributes are never copied verbatim onto an embedded definition: the constructor of the
//! original attribute may live in an assembly that is not available at runtime. The copier
//! walks the attributes of the underlying symbol, recognizes the interop attributes that are
//! meaningful for each definition kind, checks the argument shape and re-creates them from a
//! [`WellKnownMember`] constructor. Everything else is dropped.
//!
//! | Definition | Ported attributes |
//! |------------|-------------------|
//! | Type | `Guid`, `ComEventInterface`, `InterfaceType`, `BestFitMapping`, `CoClass`, `Flags` (enums), `DefaultMember`, `UnmanagedFunctionPointer`, `ExtendedLayout` |
//! | Field, property, event | `DispId` |
//! | Method | `DispId`, `LCIDConversion` |
//! | Parameter | `ParamArray`, `DateTimeConstant`, `DecimalConstant`, `DefaultParameterValue` |
//!
//! Every embedded type additionally gets `CompilerGenerated` first and `TypeIdentifier` last.
//!
//! The computations are deterministic: running one twice for the same symbol yields an equal
//! attribute set, which is what allows the callers to cache them with
//! [`crate::embed::PublishOnce`].

use std::sync::Arc;

use log::trace;

use crate::{
    embed::{
        binding::{EmbeddingBinding, TypeKind, TypeSymbol},
        diagnostics::{DiagnosticBag, Location},
        manager::EmbeddedTypesManager,
        types::EmbeddedType,
    },
    metadata::{
        customattributes::{
            AttributeData, AttributeDescription, CustomAttributeArgument,
            CustomAttributeNamedArgument, SynthesizedAttribute,
        },
        wellknown::WellKnownMember,
    },
};

/// Builder for the attribute set of one embedded definition
pub(crate) struct AttributeCopier<'a, B: EmbeddingBinding> {
    binding: &'a B,
    location: &'a Location,
    diagnostics: &'a DiagnosticBag,
    attributes: Vec<SynthesizedAttribute>,
}

impl<'a, B: EmbeddingBinding> AttributeCopier<'a, B> {
    pub(crate) fn new(
        binding: &'a B,
        location: &'a Location,
        diagnostics: &'a DiagnosticBag,
    ) -> Self {
        AttributeCopier {
            binding,
            location,
            diagnostics,
            attributes: Vec::new(),
        }
    }

    /// Create an attribute from `constructor`; omitted if the binding cannot provide it
    pub(crate) fn synthesize(
        &mut self,
        constructor: WellKnownMember,
        fixed_args: Vec<CustomAttributeArgument>,
        named_args: Vec<CustomAttributeNamedArgument>,
    ) {
        if let Some(attribute) = self.binding.create_synthesized_attribute(
            constructor,
            fixed_args,
            named_args,
            self.location,
            self.diagnostics,
        ) {
            self.attributes.push(attribute);
        }
    }

    /// Re-create `attribute` with its own arguments from `constructor`
    pub(crate) fn port(&mut self, attribute: &AttributeData, constructor: WellKnownMember) {
        self.synthesize(
            constructor,
            attribute.fixed_args().to_vec(),
            attribute.named_args().to_vec(),
        );
    }

    /// Match `attribute` against `description`. Returns the signature index on a match; the
    /// attribute is ported from `constructor` if it also has `arg_count` fixed arguments.
    pub(crate) fn port_if_shaped(
        &mut self,
        attribute: &AttributeData,
        description: &AttributeDescription,
        arg_count: usize,
        constructor: impl FnOnce(usize) -> WellKnownMember,
    ) -> Option<usize> {
        let index = self.binding.is_target_attribute(attribute, description)?;
        if attribute.fixed_args().len() == arg_count {
            self.port(attribute, constructor(index));
        }
        Some(index)
    }

    pub(crate) fn finish(self) -> Vec<SynthesizedAttribute> {
        self.attributes
    }
}

/// Attributes of an embedded field, property or event
pub(crate) fn member_attributes<B: EmbeddingBinding>(
    binding: &B,
    source: &[AttributeData],
    location: &Location,
    diagnostics: &DiagnosticBag,
) -> Vec<SynthesizedAttribute> {
    let mut copier = AttributeCopier::new(binding, location, diagnostics);
    for attribute in source {
        port_dispid(&mut copier, attribute);
    }
    copier.finish()
}

/// Attributes of an embedded method
pub(crate) fn method_attributes<B: EmbeddingBinding>(
    binding: &B,
    source: &[AttributeData],
    location: &Location,
    diagnostics: &DiagnosticBag,
) -> Vec<SynthesizedAttribute> {
    let mut copier = AttributeCopier::new(binding, location, diagnostics);
    for attribute in source {
        if port_dispid(&mut copier, attribute) {
            continue;
        }
        copier.port_if_shaped(
            attribute,
            &AttributeDescription::LCID_CONVERSION_ATTRIBUTE,
            1,
            |_| WellKnownMember::LcidConversionAttribute,
        );
    }
    copier.finish()
}

/// Attributes of an embedded parameter
pub(crate) fn parameter_attributes<B: EmbeddingBinding>(
    binding: &B,
    source: &[AttributeData],
    location: &Location,
    diagnostics: &DiagnosticBag,
) -> Vec<SynthesizedAttribute> {
    let mut copier = AttributeCopier::new(binding, location, diagnostics);
    for attribute in source {
        let matched = copier
            .port_if_shaped(attribute, &AttributeDescription::PARAM_ARRAY_ATTRIBUTE, 0, |_| {
                WellKnownMember::ParamArrayAttribute
            })
            .or_else(|| {
                copier.port_if_shaped(
                    attribute,
                    &AttributeDescription::DATE_TIME_CONSTANT_ATTRIBUTE,
                    1,
                    |_| WellKnownMember::DateTimeConstantAttribute,
                )
            })
            .or_else(|| {
                copier.port_if_shaped(
                    attribute,
                    &AttributeDescription::DECIMAL_CONSTANT_ATTRIBUTE,
                    5,
                    |index| {
                        if index == 0 {
                            WellKnownMember::DecimalConstantAttribute
                        } else {
                            WellKnownMember::DecimalConstantAttributeByteByteInt32Int32Int32
                        }
                    },
                )
            })
            .or_else(|| {
                copier.port_if_shaped(
                    attribute,
                    &AttributeDescription::DEFAULT_PARAMETER_VALUE_ATTRIBUTE,
                    1,
                    |_| WellKnownMember::DefaultParameterValueAttribute,
                )
            });

        if matched.is_none() {
            trace!("Dropping parameter attribute {}", attribute.full_name());
        }
    }
    copier.finish()
}

/// Attributes of an embedded type.
///
/// Besides building the attribute set this validates the interop contract of interfaces and,
/// if configured, embeds the members named by `DefaultMemberAttribute`.
pub(crate) fn type_attributes<B: EmbeddingBinding>(
    manager: &EmbeddedTypesManager<B>,
    ty: &Arc<EmbeddedType<B>>,
    location: &Location,
    diagnostics: &DiagnosticBag,
) -> Vec<SynthesizedAttribute> {
    let binding = manager.binding();
    let config = manager.config();
    let symbol = ty.symbol();
    let is_interface = symbol.is_interface();

    let mut copier = AttributeCopier::new(binding, location, diagnostics);
    copier.synthesize(
        WellKnownMember::CompilerGeneratedAttribute,
        Vec::new(),
        Vec::new(),
    );

    let mut has_guid = false;
    let mut has_com_event_interface = false;

    for attribute in symbol.attributes() {
        let args = attribute.fixed_args().len();

        if binding
            .is_target_attribute(&attribute, &AttributeDescription::GUID_ATTRIBUTE)
            .is_some()
        {
            if args == 1 {
                has_guid = true;
                copier.port(&attribute, WellKnownMember::GuidAttribute);
            }
        } else if binding
            .is_target_attribute(&attribute, &AttributeDescription::COM_EVENT_INTERFACE_ATTRIBUTE)
            .is_some()
        {
            if args == 2 {
                has_com_event_interface = true;
                copier.port(&attribute, WellKnownMember::ComEventInterfaceAttribute);
            }
        } else if let Some(index) =
            binding.is_target_attribute(&attribute, &AttributeDescription::INTERFACE_TYPE_ATTRIBUTE)
        {
            if args == 1 {
                let constructor = if index == 0 {
                    WellKnownMember::InterfaceTypeAttributeInt16
                } else {
                    WellKnownMember::InterfaceTypeAttributeComInterfaceType
                };
                copier.port(&attribute, constructor);
            }
        } else if binding
            .is_target_attribute(&attribute, &AttributeDescription::BEST_FIT_MAPPING_ATTRIBUTE)
            .is_some()
        {
            if args == 1 {
                copier.port(&attribute, WellKnownMember::BestFitMappingAttribute);
            }
        } else if binding
            .is_target_attribute(&attribute, &AttributeDescription::CO_CLASS_ATTRIBUTE)
            .is_some()
        {
            if args == 1 {
                copier.port(&attribute, WellKnownMember::CoClassAttribute);
            }
        } else if binding
            .is_target_attribute(&attribute, &AttributeDescription::FLAGS_ATTRIBUTE)
            .is_some()
        {
            if args == 0 && symbol.kind() == TypeKind::Enum {
                copier.port(&attribute, WellKnownMember::FlagsAttribute);
            }
        } else if binding
            .is_target_attribute(&attribute, &AttributeDescription::DEFAULT_MEMBER_ATTRIBUTE)
            .is_some()
        {
            if args == 1 {
                copier.port(&attribute, WellKnownMember::DefaultMemberAttribute);

                if config.embed_default_members {
                    if let Some(member) = attribute.fixed_args()[0].as_str() {
                        manager.embed_default_members(ty, member, location, diagnostics);
                    }
                }
            }
        } else if binding
            .is_target_attribute(
                &attribute,
                &AttributeDescription::UNMANAGED_FUNCTION_POINTER_ATTRIBUTE,
            )
            .is_some()
        {
            if args == 1 {
                copier.port(&attribute, WellKnownMember::UnmanagedFunctionPointerAttribute);
            }
        } else if binding
            .is_target_attribute(&attribute, &AttributeDescription::EXTENDED_LAYOUT_ATTRIBUTE)
            .is_some()
        {
            if args == 1 {
                copier.port(&attribute, WellKnownMember::ExtendedLayoutAttribute);
            }
        } else {
            trace!(
                "Dropping attribute {} of {}",
                attribute.full_name(),
                symbol.qualified_name()
            );
        }
    }

    // Event interfaces are exempt from the interop contract.
    if is_interface && !has_com_event_interface && config.validate_interop_attributes {
        if !symbol.is_com_import() {
            binding.report_missing_attribute(
                symbol,
                &AttributeDescription::COM_IMPORT_ATTRIBUTE,
                location,
                diagnostics,
            );
        }
        if !has_guid {
            binding.report_missing_attribute(
                symbol,
                &AttributeDescription::GUID_ATTRIBUTE,
                location,
                diagnostics,
            );
        }
    }

    if has_guid && is_interface {
        copier.synthesize(WellKnownMember::TypeIdentifierAttribute, Vec::new(), Vec::new());
    } else {
        let scope = manager.assembly_guid_string(symbol);
        copier.synthesize(
            WellKnownMember::TypeIdentifierAttributeStringString,
            vec![
                CustomAttributeArgument::string(&scope),
                CustomAttributeArgument::string(&symbol.qualified_name()),
            ],
            Vec::new(),
        );
    }

    copier.finish()
}

/// Port `DispIdAttribute`, shared by every member kind. Returns true if the attribute was a
/// `DispIdAttribute`, whatever its shape.
fn port_dispid<B: EmbeddingBinding>(
    copier: &mut AttributeCopier<'_, B>,
    attribute: &AttributeData,
) -> bool {
    copier
        .port_if_shaped(attribute, &AttributeDescription::DISP_ID_ATTRIBUTE, 1, |_| {
            WellKnownMember::DispIdAttribute
        })
        .is_some()
}

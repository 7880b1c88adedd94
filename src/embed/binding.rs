//! The binding layer the embedding subsystem is generic over.
//!
//! The embedding algorithms do not know how a compiler represents its symbols. A compiler
//! plugs its symbol table in through an [`EmbeddingBinding`], which names one concrete type per
//! symbol kind and answers the few policy questions the algorithms need (is a type linked, how
//! are attributes matched and re-created, how are collisions reported).
//!
//! # Symbol identity
//!
//! Symbols are handed out as `Arc`s and compared by pointer identity. A binding must return
//! the same `Arc` every time it hands out the same symbol (e.g. the containing type of two
//! fields of one type). Handing out fresh allocations for the same symbol makes the subsystem
//! embed that symbol twice.
//!
//! # Member enumeration
//!
//! [`TypeSymbol::methods`] returns the methods in the order they are emitted. The sequence may
//! contain `None` placeholders for vtable slots excluded from the emitted member list. Each
//! placeholder keeps its slot and widens the gap in front of the next embedded method, except
//! for a run of placeholders ahead of the first method, which occupies no slot.

use std::{fmt, sync::Arc};

use strum::{Display, EnumIter};

use crate::{
    embed::{
        diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCode, Location},
        types::EmbeddedType,
    },
    metadata::{
        constant::ConstantValue,
        customattributes::{
            AttributeData, AttributeDescription, CustomAttributeArgument,
            CustomAttributeNamedArgument, SynthesizedAttribute,
        },
        flags::{CallingConvention, TypeAttributes},
        marshalling::MarshallingInfo,
        wellknown::WellKnownMember,
    },
};

/// Kind of a named type, as far as embedding is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TypeKind {
    /// A class, never embeddable
    Class,
    /// A (COM) interface
    Interface,
    /// A value type
    Struct,
    /// An enumeration
    Enum,
    /// A delegate
    Delegate,
}

impl TypeKind {
    /// Returns true for the kinds that can be embedded at all
    #[must_use]
    pub fn is_embeddable(&self) -> bool {
        !matches!(self, TypeKind::Class)
    }
}

/// Explicit layout information of a value type (`ClassLayout` row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeLayout {
    /// Field alignment in bytes
    pub packing_size: u16,
    /// Total size of the type in bytes
    pub class_size: u32,
}

/// The capability the embedding subsystem is generic over.
///
/// Implementations name the concrete symbol types of a compiler and provide the hooks the
/// embedding process calls into. All hooks with a default implementation may be overridden.
pub trait EmbeddingBinding: Send + Sync + Sized + 'static {
    /// Named type symbol
    type Type: TypeSymbol<Self>;
    /// Field symbol
    type Field: FieldSymbol<Self>;
    /// Method symbol
    type Method: MethodSymbol<Self>;
    /// Property symbol
    type Property: PropertySymbol<Self>;
    /// Event symbol
    type Event: EventSymbol<Self>;
    /// Parameter symbol
    type Parameter: ParameterSymbol<Self>;
    /// Method type parameter symbol
    type TypeParameter: TypeParameterSymbol<Self>;
    /// A reference to a type in a signature, opaque to the embedding layer
    type TypeRef: Clone + fmt::Debug + Send + Sync + 'static;

    /// Returns true if `ty` comes from an assembly referenced with embedded interop types
    fn is_embeddable(&self, ty: &Self::Type) -> bool;

    /// Index of the assembly reference `ty` comes from
    fn assembly_ref_index(&self, ty: &Self::Type) -> usize;

    /// Display name of the assembly `ty` comes from
    fn assembly_name(&self, ty: &Self::Type) -> String;

    /// The `GuidAttribute` value of the assembly `ty` comes from
    fn assembly_guid(&self, ty: &Self::Type) -> Option<String>;

    /// Resolve a type-valued attribute argument found on `owner`
    fn resolve_attribute_type(&self, owner: &Arc<Self::Type>, name: &str)
        -> Option<Arc<Self::Type>>;

    /// Names of referenced assemblies that themselves reference the linked assembly of `ty`
    fn linked_assembly_referrers(&self, _ty: &Self::Type) -> Vec<String> {
        Vec::new()
    }

    /// Match an attribute against a description, returning the constructor signature index
    fn is_target_attribute(
        &self,
        attribute: &AttributeData,
        description: &AttributeDescription,
    ) -> Option<usize> {
        description.signature_index(attribute)
    }

    /// Re-create an attribute from a well-known constructor.
    ///
    /// Returns `None` if the constructor is not available in the target core library; the
    /// binding is expected to have reported that (see [`Diagnostic::missing_predefined_member`])
    /// and the attribute is omitted from the embedded definition.
    fn create_synthesized_attribute(
        &self,
        constructor: WellKnownMember,
        fixed_args: Vec<CustomAttributeArgument>,
        named_args: Vec<CustomAttributeNamedArgument>,
        _location: &Location,
        _diagnostics: &DiagnosticBag,
    ) -> Option<SynthesizedAttribute> {
        Some(SynthesizedAttribute::new(constructor, fixed_args, named_args))
    }

    /// Report references to the linked assembly of `ty` made by other referenced assemblies
    fn report_indirect_references_to_linked_assemblies(
        &self,
        ty: &Self::Type,
        diagnostics: &DiagnosticBag,
    ) {
        let assembly = self.assembly_name(ty);
        for referrer in self.linked_assembly_referrers(ty) {
            diagnostics.report(
                DiagnosticCode::ReferencedAssemblyReferencesLinkedPia,
                Location::None,
                vec![assembly.clone(), referrer],
            );
        }
    }

    /// Report that two linked assemblies contribute a type with the same name
    fn report_name_collision_between_embedded_types(
        &self,
        first: &EmbeddedType<Self>,
        second: &EmbeddedType<Self>,
        diagnostics: &DiagnosticBag,
    ) {
        diagnostics.report(
            DiagnosticCode::InteropTypesWithSameNameAndGuid,
            second.symbol().location(),
            vec![
                second.qualified_name(),
                self.assembly_name(first.symbol()),
                self.assembly_name(second.symbol()),
            ],
        );
    }

    /// Report that an embedded type clashes with a type declared in the compiled module
    fn report_name_collision_with_already_declared_type(
        &self,
        ty: &EmbeddedType<Self>,
        diagnostics: &DiagnosticBag,
    ) {
        diagnostics.report(
            DiagnosticCode::LocalTypeNameClash,
            ty.symbol().location(),
            vec![ty.qualified_name(), self.assembly_name(ty.symbol())],
        );
    }

    /// Report that a linked type lacks an attribute required for embedding
    fn report_missing_attribute(
        &self,
        ty: &Self::Type,
        description: &AttributeDescription,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) {
        diagnostics.add(Diagnostic::new(
            DiagnosticCode::InteropTypeMissingAttribute,
            location.clone(),
            vec![ty.qualified_name(), description.full_name()],
        ));
    }
}

/// A named type
pub trait TypeSymbol<B: EmbeddingBinding>: Send + Sync + 'static {
    /// Simple metadata name
    fn name(&self) -> &str;
    /// Namespace, empty for the global namespace
    fn namespace(&self) -> &str;
    /// Raw `TypeAttributes`
    fn flags(&self) -> u32;
    /// Kind of the type
    fn kind(&self) -> TypeKind;
    /// Returns true if the type is nested in another type
    fn is_nested(&self) -> bool;
    /// Returns true if the type (or a containing type) has type parameters
    fn is_generic(&self) -> bool;
    /// Base class, if any
    fn base_type(&self) -> Option<B::TypeRef>;
    /// Directly implemented (or, for interfaces, inherited) interfaces
    fn interfaces(&self) -> Vec<Arc<B::Type>>;
    /// Fields, in emission order
    fn fields(&self) -> Vec<Arc<B::Field>>;
    /// Methods, in emission order, with `None` for vtable slots outside of the emitted list
    fn methods(&self) -> Vec<Option<Arc<B::Method>>>;
    /// Properties, in emission order
    fn properties(&self) -> Vec<Arc<B::Property>>;
    /// Events, in emission order
    fn events(&self) -> Vec<Arc<B::Event>>;
    /// Custom attributes, in emission order
    fn attributes(&self) -> Vec<AttributeData>;

    /// Explicit layout, if the type has one
    fn layout(&self) -> Option<TypeLayout> {
        None
    }

    /// Where the type is declared
    fn location(&self) -> Location {
        Location::None
    }

    /// Namespace-qualified name
    fn qualified_name(&self) -> String {
        if self.namespace().is_empty() {
            self.name().to_string()
        } else {
            format!("{}.{}", self.namespace(), self.name())
        }
    }

    /// Returns true if the type is an interface
    fn is_interface(&self) -> bool {
        self.flags() & TypeAttributes::INTERFACE != 0
    }

    /// Returns true if the type is marked `ComImport`
    fn is_com_import(&self) -> bool {
        self.flags() & TypeAttributes::IMPORT != 0
    }
}

/// A field
pub trait FieldSymbol<B: EmbeddingBinding>: Send + Sync + 'static {
    /// Field name
    fn name(&self) -> &str;
    /// Raw `FieldAttributes`
    fn flags(&self) -> u32;
    /// The declaring type
    fn containing_type(&self) -> Arc<B::Type>;
    /// Declared type
    fn field_type(&self) -> B::TypeRef;
    /// Custom attributes, in emission order
    fn attributes(&self) -> Vec<AttributeData>;

    /// Custom modifiers on the `ref` of a ref field
    fn ref_custom_modifiers(&self) -> Vec<B::TypeRef> {
        Vec::new()
    }
    /// Returns true for ref fields
    fn is_by_reference(&self) -> bool {
        false
    }
    /// Literal value
    fn constant(&self) -> Option<ConstantValue> {
        None
    }
    /// Explicit marshalling descriptor
    fn marshalling(&self) -> Option<MarshallingInfo> {
        None
    }
    /// Explicit layout offset
    fn offset(&self) -> Option<u32> {
        None
    }
    /// Where the field is declared
    fn location(&self) -> Location {
        Location::None
    }
}

/// A method (including property and event accessors)
pub trait MethodSymbol<B: EmbeddingBinding>: Send + Sync + 'static {
    /// Method name
    fn name(&self) -> &str;
    /// Raw `MethodAttributes`
    fn flags(&self) -> u32;
    /// Raw `MethodImplAttributes`
    fn impl_flags(&self) -> u32;
    /// The declaring type
    fn containing_type(&self) -> Arc<B::Type>;
    /// Signature calling convention
    fn calling_convention(&self) -> CallingConvention;
    /// Return type, `None` for `void`
    fn return_type(&self) -> Option<B::TypeRef>;
    /// Parameters, in declaration order
    fn parameters(&self) -> Vec<Arc<B::Parameter>>;
    /// Custom attributes, in emission order
    fn attributes(&self) -> Vec<AttributeData>;

    /// Method type parameters
    fn type_parameters(&self) -> Vec<Arc<B::TypeParameter>> {
        Vec::new()
    }
    /// Marshalling descriptor of the return value
    fn return_marshalling(&self) -> Option<MarshallingInfo> {
        None
    }
    /// The property this method is an accessor of
    fn associated_property(&self) -> Option<Arc<B::Property>> {
        None
    }
    /// The event this method is an accessor of
    fn associated_event(&self) -> Option<Arc<B::Event>> {
        None
    }
    /// Where the method is declared
    fn location(&self) -> Location {
        Location::None
    }
}

/// A property
pub trait PropertySymbol<B: EmbeddingBinding>: Send + Sync + 'static {
    /// Property name
    fn name(&self) -> &str;
    /// Raw `PropertyAttributes`
    fn flags(&self) -> u32;
    /// Declared type
    fn property_type(&self) -> B::TypeRef;
    /// Get accessor
    fn getter(&self) -> Option<Arc<B::Method>>;
    /// Set accessor
    fn setter(&self) -> Option<Arc<B::Method>>;
    /// Custom attributes, in emission order
    fn attributes(&self) -> Vec<AttributeData>;

    /// Indexer parameters
    fn parameters(&self) -> Vec<Arc<B::Parameter>> {
        Vec::new()
    }
    /// Default value
    fn constant(&self) -> Option<ConstantValue> {
        None
    }
    /// Where the property is declared
    fn location(&self) -> Location {
        Location::None
    }
}

/// An event
pub trait EventSymbol<B: EmbeddingBinding>: Send + Sync + 'static {
    /// Event name
    fn name(&self) -> &str;
    /// Raw `EventAttributes`
    fn flags(&self) -> u32;
    /// The declaring type
    fn containing_type(&self) -> Arc<B::Type>;
    /// Delegate type of the event
    fn event_type(&self) -> B::TypeRef;
    /// Add accessor
    fn adder(&self) -> Option<Arc<B::Method>>;
    /// Remove accessor
    fn remover(&self) -> Option<Arc<B::Method>>;
    /// Custom attributes, in emission order
    fn attributes(&self) -> Vec<AttributeData>;

    /// Where the event is declared
    fn location(&self) -> Location {
        Location::None
    }
}

/// A parameter of a method or indexer
pub trait ParameterSymbol<B: EmbeddingBinding>: Send + Sync + 'static {
    /// Parameter name
    fn name(&self) -> &str;
    /// Zero-based position in the signature
    fn ordinal(&self) -> u16;
    /// Raw `ParamAttributes`
    fn flags(&self) -> u32;
    /// Declared type
    fn parameter_type(&self) -> B::TypeRef;
    /// Custom attributes, in emission order
    fn attributes(&self) -> Vec<AttributeData>;

    /// Custom modifiers on the `ref` of a by-ref parameter
    fn ref_custom_modifiers(&self) -> Vec<B::TypeRef> {
        Vec::new()
    }
    /// Returns true for `ref`/`out`/`in` parameters
    fn is_by_reference(&self) -> bool {
        false
    }
    /// Default value of an optional parameter
    fn default_value(&self) -> Option<ConstantValue> {
        None
    }
    /// Explicit marshalling descriptor
    fn marshalling(&self) -> Option<MarshallingInfo> {
        None
    }
    /// Where the parameter is declared
    fn location(&self) -> Location {
        Location::None
    }
}

/// A type parameter of a generic method
pub trait TypeParameterSymbol<B: EmbeddingBinding>: Send + Sync + 'static {
    /// Type parameter name
    fn name(&self) -> &str;
    /// Zero-based position in the type parameter list
    fn ordinal(&self) -> u16;
    /// Type constraints
    fn constraints(&self) -> Vec<B::TypeRef>;

    /// `class` constraint
    fn has_reference_type_constraint(&self) -> bool {
        false
    }
    /// `struct` constraint
    fn has_value_type_constraint(&self) -> bool {
        false
    }
    /// `new()` constraint
    fn has_constructor_constraint(&self) -> bool {
        false
    }
}

//! In-memory symbol binding shared by the integration tests and benchmarks.
//!
//! Types are described with [`TypeBuilder`] and frozen into `Arc`s; members keep a weak
//! reference to their declaring type, accessors a weak reference to their property or event.
#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, OnceLock, Weak},
};

use nopia::{
    metadata::flags::{FieldAttributes, MethodImplCodeType, TypeAttributes},
    prelude::*,
};

pub const INTEROP_SERVICES: &str = "System.Runtime.InteropServices";
pub const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";

/// `public virtual abstract newslot hidebysig`
pub const ABSTRACT_METHOD: u32 = 0x0006 | 0x0040 | 0x0080 | 0x0100 | 0x0400;
/// `public hidebysig`
pub const INSTANCE_METHOD: u32 = 0x0006 | 0x0080;
/// `specialname`
pub const SPECIAL_NAME: u32 = 0x0800;

// ================================================================================================
// Assemblies
// ================================================================================================

/// An assembly test types come from
#[derive(Debug, Clone)]
pub struct TestAssembly {
    pub index: usize,
    pub name: String,
    pub guid: Option<String>,
    pub linked: bool,
    pub referrers: Vec<String>,
}

impl TestAssembly {
    /// An assembly referenced with "embed interop types"
    pub fn linked(index: usize, name: &str) -> Self {
        TestAssembly {
            index,
            name: name.to_string(),
            guid: Some(format!("00000000-0000-0000-0000-{index:012}")),
            linked: true,
            referrers: Vec::new(),
        }
    }

    /// A regularly referenced assembly
    pub fn referenced(index: usize, name: &str) -> Self {
        TestAssembly {
            linked: false,
            ..Self::linked(index, name)
        }
    }

    pub fn guid(mut self, guid: Option<&str>) -> Self {
        self.guid = guid.map(str::to_string);
        self
    }

    pub fn referenced_by(mut self, referrer: &str) -> Self {
        self.referrers.push(referrer.to_string());
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

// ================================================================================================
// Symbols
// ================================================================================================

pub struct TestType {
    pub name: String,
    pub namespace: String,
    pub flags: u32,
    pub kind: TypeKind,
    pub nested: bool,
    pub generic: bool,
    pub assembly: Arc<TestAssembly>,
    pub location: Location,
    pub attributes: Vec<AttributeData>,
    pub interfaces: Vec<Arc<TestType>>,
    pub layout: Option<TypeLayout>,
    pub fields: Vec<Arc<TestField>>,
    pub methods: Vec<Option<Arc<TestMethod>>>,
    pub properties: Vec<Arc<TestProperty>>,
    pub events: Vec<Arc<TestEvent>>,
}

impl TestType {
    pub fn field(&self, name: &str) -> Arc<TestField> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no field {name}"))
    }

    pub fn method(&self, name: &str) -> Arc<TestMethod> {
        self.methods
            .iter()
            .flatten()
            .find(|m| m.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no method {name}"))
    }

    pub fn property(&self, name: &str) -> Arc<TestProperty> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no property {name}"))
    }

    pub fn event(&self, name: &str) -> Arc<TestEvent> {
        self.events
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no event {name}"))
    }
}

pub struct TestField {
    pub name: String,
    pub flags: u32,
    pub containing: Weak<TestType>,
    pub attributes: Vec<AttributeData>,
    pub constant: Option<ConstantValue>,
    pub marshalling: Option<MarshallingInfo>,
    pub offset: Option<u32>,
}

pub struct TestMethod {
    pub name: String,
    pub flags: u32,
    pub impl_flags: u32,
    pub containing: Weak<TestType>,
    pub parameters: Vec<Arc<TestParameter>>,
    pub type_parameters: Vec<Arc<TestTypeParameter>>,
    pub attributes: Vec<AttributeData>,
    pub property: OnceLock<Weak<TestProperty>>,
    pub event: OnceLock<Weak<TestEvent>>,
}

pub struct TestProperty {
    pub name: String,
    pub getter: Option<Arc<TestMethod>>,
    pub setter: Option<Arc<TestMethod>>,
    pub attributes: Vec<AttributeData>,
}

pub struct TestEvent {
    pub name: String,
    pub containing: Weak<TestType>,
    pub adder: Option<Arc<TestMethod>>,
    pub remover: Option<Arc<TestMethod>>,
    pub attributes: Vec<AttributeData>,
}

pub struct TestParameter {
    pub name: String,
    pub ordinal: u16,
    pub flags: u32,
    pub attributes: Vec<AttributeData>,
    pub default_value: Option<ConstantValue>,
}

pub struct TestTypeParameter {
    pub name: String,
    pub ordinal: u16,
}

fn upgrade(containing: &Weak<TestType>) -> Arc<TestType> {
    containing.upgrade().expect("declaring type dropped")
}

impl TypeSymbol<TestBinding> for TestType {
    fn name(&self) -> &str {
        &self.name
    }
    fn namespace(&self) -> &str {
        &self.namespace
    }
    fn flags(&self) -> u32 {
        self.flags
    }
    fn kind(&self) -> TypeKind {
        self.kind
    }
    fn is_nested(&self) -> bool {
        self.nested
    }
    fn is_generic(&self) -> bool {
        self.generic
    }
    fn base_type(&self) -> Option<String> {
        match self.kind {
            TypeKind::Struct => Some("System.ValueType".to_string()),
            TypeKind::Enum => Some("System.Enum".to_string()),
            TypeKind::Delegate => Some("System.MulticastDelegate".to_string()),
            TypeKind::Class => Some("System.Object".to_string()),
            TypeKind::Interface => None,
        }
    }
    fn interfaces(&self) -> Vec<Arc<TestType>> {
        self.interfaces.clone()
    }
    fn fields(&self) -> Vec<Arc<TestField>> {
        self.fields.clone()
    }
    fn methods(&self) -> Vec<Option<Arc<TestMethod>>> {
        self.methods.clone()
    }
    fn properties(&self) -> Vec<Arc<TestProperty>> {
        self.properties.clone()
    }
    fn events(&self) -> Vec<Arc<TestEvent>> {
        self.events.clone()
    }
    fn attributes(&self) -> Vec<AttributeData> {
        self.attributes.clone()
    }
    fn layout(&self) -> Option<TypeLayout> {
        self.layout
    }
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl FieldSymbol<TestBinding> for TestField {
    fn name(&self) -> &str {
        &self.name
    }
    fn flags(&self) -> u32 {
        self.flags
    }
    fn containing_type(&self) -> Arc<TestType> {
        upgrade(&self.containing)
    }
    fn field_type(&self) -> String {
        "int".to_string()
    }
    fn attributes(&self) -> Vec<AttributeData> {
        self.attributes.clone()
    }
    fn constant(&self) -> Option<ConstantValue> {
        self.constant.clone()
    }
    fn marshalling(&self) -> Option<MarshallingInfo> {
        self.marshalling.clone()
    }
    fn offset(&self) -> Option<u32> {
        self.offset
    }
}

impl MethodSymbol<TestBinding> for TestMethod {
    fn name(&self) -> &str {
        &self.name
    }
    fn flags(&self) -> u32 {
        self.flags
    }
    fn impl_flags(&self) -> u32 {
        self.impl_flags
    }
    fn containing_type(&self) -> Arc<TestType> {
        upgrade(&self.containing)
    }
    fn calling_convention(&self) -> CallingConvention {
        if self.type_parameters.is_empty() {
            CallingConvention::HAS_THIS
        } else {
            CallingConvention::HAS_THIS | CallingConvention::GENERIC
        }
    }
    fn return_type(&self) -> Option<String> {
        None
    }
    fn parameters(&self) -> Vec<Arc<TestParameter>> {
        self.parameters.clone()
    }
    fn attributes(&self) -> Vec<AttributeData> {
        self.attributes.clone()
    }
    fn type_parameters(&self) -> Vec<Arc<TestTypeParameter>> {
        self.type_parameters.clone()
    }
    fn associated_property(&self) -> Option<Arc<TestProperty>> {
        self.property.get().and_then(Weak::upgrade)
    }
    fn associated_event(&self) -> Option<Arc<TestEvent>> {
        self.event.get().and_then(Weak::upgrade)
    }
}

impl PropertySymbol<TestBinding> for TestProperty {
    fn name(&self) -> &str {
        &self.name
    }
    fn flags(&self) -> u32 {
        0
    }
    fn property_type(&self) -> String {
        "int".to_string()
    }
    fn getter(&self) -> Option<Arc<TestMethod>> {
        self.getter.clone()
    }
    fn setter(&self) -> Option<Arc<TestMethod>> {
        self.setter.clone()
    }
    fn attributes(&self) -> Vec<AttributeData> {
        self.attributes.clone()
    }
}

impl EventSymbol<TestBinding> for TestEvent {
    fn name(&self) -> &str {
        &self.name
    }
    fn flags(&self) -> u32 {
        0
    }
    fn containing_type(&self) -> Arc<TestType> {
        upgrade(&self.containing)
    }
    fn event_type(&self) -> String {
        "System.EventHandler".to_string()
    }
    fn adder(&self) -> Option<Arc<TestMethod>> {
        self.adder.clone()
    }
    fn remover(&self) -> Option<Arc<TestMethod>> {
        self.remover.clone()
    }
    fn attributes(&self) -> Vec<AttributeData> {
        self.attributes.clone()
    }
}

impl ParameterSymbol<TestBinding> for TestParameter {
    fn name(&self) -> &str {
        &self.name
    }
    fn ordinal(&self) -> u16 {
        self.ordinal
    }
    fn flags(&self) -> u32 {
        self.flags
    }
    fn parameter_type(&self) -> String {
        "object".to_string()
    }
    fn attributes(&self) -> Vec<AttributeData> {
        self.attributes.clone()
    }
    fn default_value(&self) -> Option<ConstantValue> {
        self.default_value.clone()
    }
}

impl TypeParameterSymbol<TestBinding> for TestTypeParameter {
    fn name(&self) -> &str {
        &self.name
    }
    fn ordinal(&self) -> u16 {
        self.ordinal
    }
    fn constraints(&self) -> Vec<String> {
        Vec::new()
    }
}

// ================================================================================================
// Binding
// ================================================================================================

/// Binding over a fixed set of test types
#[derive(Default)]
pub struct TestBinding {
    types: HashMap<String, Arc<TestType>>,
    missing_constructors: HashSet<WellKnownMember>,
}

impl TestBinding {
    /// Binding resolving attribute type arguments against `types`
    pub fn new<'a>(types: impl IntoIterator<Item = &'a Arc<TestType>>) -> Self {
        TestBinding {
            types: types
                .into_iter()
                .map(|ty| (ty.qualified_name(), ty.clone()))
                .collect(),
            missing_constructors: HashSet::new(),
        }
    }

    /// Pretend the target core library lacks `constructor`
    pub fn without_constructor(mut self, constructor: WellKnownMember) -> Self {
        self.missing_constructors.insert(constructor);
        self
    }
}

impl EmbeddingBinding for TestBinding {
    type Type = TestType;
    type Field = TestField;
    type Method = TestMethod;
    type Property = TestProperty;
    type Event = TestEvent;
    type Parameter = TestParameter;
    type TypeParameter = TestTypeParameter;
    type TypeRef = String;

    fn is_embeddable(&self, ty: &TestType) -> bool {
        ty.assembly.linked
    }

    fn assembly_ref_index(&self, ty: &TestType) -> usize {
        ty.assembly.index
    }

    fn assembly_name(&self, ty: &TestType) -> String {
        ty.assembly.name.clone()
    }

    fn assembly_guid(&self, ty: &TestType) -> Option<String> {
        ty.assembly.guid.clone()
    }

    fn resolve_attribute_type(&self, _owner: &Arc<TestType>, name: &str) -> Option<Arc<TestType>> {
        self.types.get(name).cloned()
    }

    fn linked_assembly_referrers(&self, ty: &TestType) -> Vec<String> {
        ty.assembly.referrers.clone()
    }

    fn create_synthesized_attribute(
        &self,
        constructor: WellKnownMember,
        fixed_args: Vec<CustomAttributeArgument>,
        named_args: Vec<CustomAttributeNamedArgument>,
        location: &Location,
        diagnostics: &DiagnosticBag,
    ) -> Option<SynthesizedAttribute> {
        if self.missing_constructors.contains(&constructor) {
            diagnostics.add(Diagnostic::missing_predefined_member(
                constructor,
                location.clone(),
            ));
            return None;
        }
        Some(SynthesizedAttribute::new(constructor, fixed_args, named_args))
    }
}

// ================================================================================================
// Builders
// ================================================================================================

pub struct FieldSpec {
    pub name: String,
    pub flags: u32,
    pub attributes: Vec<AttributeData>,
    pub constant: Option<ConstantValue>,
    pub marshalling: Option<MarshallingInfo>,
    pub offset: Option<u32>,
}

impl FieldSpec {
    /// `public` instance field
    pub fn public(name: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            flags: FieldAttributes::PUBLIC,
            attributes: Vec::new(),
            constant: None,
            marshalling: None,
            offset: None,
        }
    }

    /// `public static literal` enum member
    pub fn literal(name: &str, value: ConstantValue) -> Self {
        FieldSpec {
            flags: FieldAttributes::PUBLIC | FieldAttributes::STATIC | FieldAttributes::LITERAL,
            constant: Some(value),
            ..Self::public(name)
        }
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn marshal(mut self, marshalling: MarshallingInfo) -> Self {
        self.flags |= FieldAttributes::HAS_FIELD_MARSHAL;
        self.marshalling = Some(marshalling);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

pub struct ParameterSpec {
    pub name: String,
    pub flags: u32,
    pub attributes: Vec<AttributeData>,
    pub default_value: Option<ConstantValue>,
}

impl ParameterSpec {
    pub fn new(name: &str) -> Self {
        ParameterSpec {
            name: name.to_string(),
            flags: 0,
            attributes: Vec::new(),
            default_value: None,
        }
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn default_value(mut self, value: ConstantValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

pub struct MethodSpec {
    pub name: String,
    pub flags: u32,
    pub impl_flags: u32,
    pub attributes: Vec<AttributeData>,
    pub parameters: Vec<ParameterSpec>,
    pub type_parameters: Vec<String>,
}

impl MethodSpec {
    /// Interface method
    pub fn abstract_virtual(name: &str) -> Self {
        MethodSpec {
            name: name.to_string(),
            flags: ABSTRACT_METHOD,
            impl_flags: 0,
            attributes: Vec::new(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    /// Method with an implementation
    pub fn instance(name: &str) -> Self {
        MethodSpec {
            flags: INSTANCE_METHOD,
            ..Self::abstract_virtual(name)
        }
    }

    /// Delegate member implemented by the runtime
    pub fn runtime(name: &str) -> Self {
        MethodSpec {
            flags: INSTANCE_METHOD | 0x0040,
            impl_flags: MethodImplCodeType::RUNTIME.bits(),
            ..Self::abstract_virtual(name)
        }
    }

    pub fn special_name(mut self) -> Self {
        self.flags |= SPECIAL_NAME;
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn type_parameter(mut self, name: &str) -> Self {
        self.type_parameters.push(name.to_string());
        self
    }

    fn build(self, containing: Weak<TestType>) -> TestMethod {
        TestMethod {
            name: self.name,
            flags: self.flags,
            impl_flags: self.impl_flags,
            containing,
            parameters: self
                .parameters
                .into_iter()
                .enumerate()
                .map(|(ordinal, spec)| {
                    Arc::new(TestParameter {
                        name: spec.name,
                        ordinal: ordinal as u16,
                        flags: spec.flags,
                        attributes: spec.attributes,
                        default_value: spec.default_value,
                    })
                })
                .collect(),
            type_parameters: self
                .type_parameters
                .into_iter()
                .enumerate()
                .map(|(ordinal, name)| {
                    Arc::new(TestTypeParameter {
                        name,
                        ordinal: ordinal as u16,
                    })
                })
                .collect(),
            attributes: self.attributes,
            property: OnceLock::new(),
            event: OnceLock::new(),
        }
    }
}

struct AccessorSpec {
    name: String,
    first: Option<String>,
    second: Option<String>,
}

/// Builder for a test type and its members
pub struct TypeBuilder {
    name: String,
    namespace: String,
    flags: u32,
    kind: TypeKind,
    nested: bool,
    generic: bool,
    location: Location,
    attributes: Vec<AttributeData>,
    interfaces: Vec<Arc<TestType>>,
    layout: Option<TypeLayout>,
    fields: Vec<FieldSpec>,
    methods: Vec<Option<MethodSpec>>,
    properties: Vec<AccessorSpec>,
    events: Vec<AccessorSpec>,
}

impl TypeBuilder {
    fn new(namespace: &str, name: &str, kind: TypeKind, flags: u32) -> Self {
        TypeBuilder {
            name: name.to_string(),
            namespace: namespace.to_string(),
            flags,
            kind,
            nested: false,
            generic: false,
            location: Location::None,
            attributes: Vec::new(),
            interfaces: Vec::new(),
            layout: None,
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Interface without `ComImport` and `Guid`
    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeKind::Interface,
            TypeAttributes::PUBLIC | TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT,
        )
    }

    /// `[ComImport, Guid(guid)]` interface
    pub fn com_interface(namespace: &str, name: &str, guid: &str) -> Self {
        let mut builder = Self::interface(namespace, name).attribute(guid_attribute(guid));
        builder.flags |= TypeAttributes::IMPORT;
        builder
    }

    pub fn structure(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeKind::Struct,
            TypeAttributes::PUBLIC | TypeAttributes::SEALED | TypeAttributes::SEQUENTIAL_LAYOUT,
        )
    }

    pub fn enumeration(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeKind::Enum,
            TypeAttributes::PUBLIC | TypeAttributes::SEALED,
        )
    }

    pub fn delegate(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeKind::Delegate,
            TypeAttributes::PUBLIC | TypeAttributes::SEALED,
        )
    }

    pub fn class(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, TypeKind::Class, TypeAttributes::PUBLIC)
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    pub fn generic(mut self) -> Self {
        self.generic = true;
        self
    }

    pub fn at(mut self, path: &str, line: u32) -> Self {
        self.location = Location::source(path, line, 1);
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn implements(mut self, interface: &Arc<TestType>) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    pub fn layout(mut self, packing_size: u16, class_size: u32) -> Self {
        self.layout = Some(TypeLayout {
            packing_size,
            class_size,
        });
        self
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn method(mut self, spec: MethodSpec) -> Self {
        self.methods.push(Some(spec));
        self
    }

    /// Abstract interface method
    pub fn slot(self, name: &str) -> Self {
        self.method(MethodSpec::abstract_virtual(name))
    }

    /// A vtable slot excluded from the emitted method list
    pub fn placeholder(mut self) -> Self {
        self.methods.push(None);
        self
    }

    /// Property over previously added accessor methods
    pub fn property(mut self, name: &str, getter: Option<&str>, setter: Option<&str>) -> Self {
        self.properties.push(AccessorSpec {
            name: name.to_string(),
            first: getter.map(str::to_string),
            second: setter.map(str::to_string),
        });
        self
    }

    /// Event over previously added accessor methods
    pub fn event(mut self, name: &str, adder: Option<&str>, remover: Option<&str>) -> Self {
        self.events.push(AccessorSpec {
            name: name.to_string(),
            first: adder.map(str::to_string),
            second: remover.map(str::to_string),
        });
        self
    }

    pub fn build(self, assembly: &Arc<TestAssembly>) -> Arc<TestType> {
        Arc::new_cyclic(|this| {
            let fields = self
                .fields
                .into_iter()
                .map(|spec| {
                    Arc::new(TestField {
                        name: spec.name,
                        flags: spec.flags,
                        containing: this.clone(),
                        attributes: spec.attributes,
                        constant: spec.constant,
                        marshalling: spec.marshalling,
                        offset: spec.offset,
                    })
                })
                .collect();

            let methods: Vec<Option<Arc<TestMethod>>> = self
                .methods
                .into_iter()
                .map(|spec| spec.map(|spec| Arc::new(spec.build(this.clone()))))
                .collect();
            let accessor = |name: &Option<String>| {
                name.as_ref().map(|name| {
                    methods
                        .iter()
                        .flatten()
                        .find(|m| &m.name == name)
                        .cloned()
                        .unwrap_or_else(|| panic!("no accessor {name}"))
                })
            };

            let properties = self
                .properties
                .iter()
                .map(|spec| {
                    let property = Arc::new(TestProperty {
                        name: spec.name.clone(),
                        getter: accessor(&spec.first),
                        setter: accessor(&spec.second),
                        attributes: Vec::new(),
                    });
                    for method in property.getter.iter().chain(property.setter.iter()) {
                        let _ = method.property.set(Arc::downgrade(&property));
                    }
                    property
                })
                .collect();

            let events = self
                .events
                .iter()
                .map(|spec| {
                    let event = Arc::new(TestEvent {
                        name: spec.name.clone(),
                        containing: this.clone(),
                        adder: accessor(&spec.first),
                        remover: accessor(&spec.second),
                        attributes: Vec::new(),
                    });
                    for method in event.adder.iter().chain(event.remover.iter()) {
                        let _ = method.event.set(Arc::downgrade(&event));
                    }
                    event
                })
                .collect();

            TestType {
                name: self.name,
                namespace: self.namespace,
                flags: self.flags,
                kind: self.kind,
                nested: self.nested,
                generic: self.generic,
                assembly: assembly.clone(),
                location: self.location,
                attributes: self.attributes,
                interfaces: self.interfaces,
                layout: self.layout,
                fields,
                methods,
                properties,
                events,
            }
        })
    }
}

// ================================================================================================
// Attributes
// ================================================================================================

pub fn guid_attribute(guid: &str) -> AttributeData {
    AttributeData::new(
        INTEROP_SERVICES,
        "GuidAttribute",
        vec![AttributeParamType::String],
        vec![CustomAttributeArgument::string(guid)],
    )
}

pub fn com_event_interface_attribute(source: &str, provider: &str) -> AttributeData {
    AttributeData::new(
        INTEROP_SERVICES,
        "ComEventInterfaceAttribute",
        vec![AttributeParamType::Type, AttributeParamType::Type],
        vec![
            CustomAttributeArgument::type_name(source),
            CustomAttributeArgument::type_name(provider),
        ],
    )
}

pub fn interface_type_attribute(kind: i16) -> AttributeData {
    AttributeData::new(
        INTEROP_SERVICES,
        "InterfaceTypeAttribute",
        vec![AttributeParamType::I2],
        vec![CustomAttributeArgument::I2(kind)],
    )
}

pub fn dispid_attribute(id: i32) -> AttributeData {
    AttributeData::new(
        INTEROP_SERVICES,
        "DispIdAttribute",
        vec![AttributeParamType::I4],
        vec![CustomAttributeArgument::I4(id)],
    )
}

pub fn lcid_conversion_attribute(index: i32) -> AttributeData {
    AttributeData::new(
        INTEROP_SERVICES,
        "LCIDConversionAttribute",
        vec![AttributeParamType::I4],
        vec![CustomAttributeArgument::I4(index)],
    )
}

pub fn default_member_attribute(member: &str) -> AttributeData {
    AttributeData::new(
        "System.Reflection",
        "DefaultMemberAttribute",
        vec![AttributeParamType::String],
        vec![CustomAttributeArgument::string(member)],
    )
}

pub fn flags_attribute() -> AttributeData {
    AttributeData::new("System", "FlagsAttribute", Vec::new(), Vec::new())
}

pub fn param_array_attribute() -> AttributeData {
    AttributeData::new("System", "ParamArrayAttribute", Vec::new(), Vec::new())
}

pub fn decimal_constant_attribute(
    scale: u8,
    sign: u8,
    hi: i32,
    mid: i32,
    lo: i32,
) -> AttributeData {
    AttributeData::new(
        COMPILER_SERVICES,
        "DecimalConstantAttribute",
        vec![
            AttributeParamType::U1,
            AttributeParamType::U1,
            AttributeParamType::I4,
            AttributeParamType::I4,
            AttributeParamType::I4,
        ],
        vec![
            CustomAttributeArgument::U1(scale),
            CustomAttributeArgument::U1(sign),
            CustomAttributeArgument::I4(hi),
            CustomAttributeArgument::I4(mid),
            CustomAttributeArgument::I4(lo),
        ],
    )
}

pub fn obsolete_attribute(message: &str) -> AttributeData {
    AttributeData::new(
        "System",
        "ObsoleteAttribute",
        vec![AttributeParamType::String],
        vec![CustomAttributeArgument::string(message)],
    )
}

// ================================================================================================
// Helpers
// ================================================================================================

/// Constructors of an attribute set, in order
pub fn constructors(attributes: &[SynthesizedAttribute]) -> Vec<WellKnownMember> {
    attributes.iter().map(|a| a.constructor).collect()
}

/// Names of the method slots of a frozen type, gaps included
pub fn slot_names(ty: &EmbeddedType<TestBinding>) -> Vec<String> {
    ty.methods()
        .expect("type set is frozen")
        .iter()
        .map(|slot| slot.name().to_string())
        .collect()
}

pub fn manager(types: &[&Arc<TestType>]) -> Arc<EmbeddedTypesManager<TestBinding>> {
    EmbeddedTypesManager::new(
        TestBinding::new(types.iter().copied()),
        EmbeddingConfig::default(),
    )
}

pub fn freeze(
    manager: &EmbeddedTypesManager<TestBinding>,
    diagnostics: &DiagnosticBag,
) -> Arc<[Arc<EmbeddedType<TestBinding>>]> {
    manager.get_types(diagnostics, &HashSet::new())
}

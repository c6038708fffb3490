//! Type descriptors
//!
//! A [`TypeDescriptor`] is a cheap, shareable handle to a type of the host
//! type system. Builtin types are created once per process; hosts describe
//! their own entity types with [`TypeBuilder`].
//!
//! Identity is structural: two descriptors are equal when their category,
//! qualified name and generic arguments match, regardless of which `Arc`
//! they live in. The numeric classification is computed once, when the
//! descriptor is built, from the unwrapped (non-nullable, non-enum) form.

use crate::{BuiltinType, MemberInfo, NumericKind};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

/// Broad category of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// One of the builtin system types
    Builtin(BuiltinType),
    /// Enumeration with its underlying builtin type
    Enum(BuiltinType),
    /// Reference type with an optional base class
    Class,
    /// User-defined value type
    Struct,
    /// Interface type
    Interface,
}

struct TypeData {
    category: TypeCategory,
    namespace: Option<String>,
    name: String,
    base: Option<TypeDescriptor>,
    interfaces: Vec<TypeDescriptor>,
    generic_arity: usize,
    generic_definition: Option<TypeDescriptor>,
    generic_arguments: Vec<TypeDescriptor>,
    members: Vec<MemberInfo>,
    numeric_kind: NumericKind,
}

/// Handle to a type in the host type system
#[derive(Clone)]
pub struct TypeDescriptor(Arc<TypeData>);

static OBJECT: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeBuilder::new(TypeCategory::Builtin(BuiltinType::Object), "System", "Object")
        .without_base()
        .build()
});

static BUILTINS: LazyLock<Vec<TypeDescriptor>> = LazyLock::new(|| {
    BuiltinType::ALL
        .iter()
        .map(|builtin| match builtin {
            BuiltinType::Object => OBJECT.clone(),
            other => TypeBuilder::new(TypeCategory::Builtin(*other), "System", other.name()).build(),
        })
        .collect()
});

static NULLABLE: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeBuilder::new(TypeCategory::Struct, "System", "Nullable")
        .generic_arity(1)
        .build()
});

impl TypeDescriptor {
    // === Constructors ===

    /// Descriptor of a builtin type
    pub fn of(builtin: BuiltinType) -> Self {
        BUILTINS[builtin as usize].clone()
    }

    /// System.Object
    pub fn object() -> Self {
        OBJECT.clone()
    }

    /// System.String
    pub fn string() -> Self {
        Self::of(BuiltinType::String)
    }

    /// System.Boolean
    pub fn boolean() -> Self {
        Self::of(BuiltinType::Boolean)
    }

    /// System.Int32
    pub fn int32() -> Self {
        Self::of(BuiltinType::Int32)
    }

    /// The open `System.Nullable<>` definition
    pub fn nullable_definition() -> Self {
        NULLABLE.clone()
    }

    /// Start describing a class
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(TypeCategory::Class, namespace, name)
    }

    /// Start describing a user-defined value type
    pub fn structure(namespace: impl Into<String>, name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(TypeCategory::Struct, namespace, name)
    }

    /// Start describing an interface
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(TypeCategory::Interface, namespace, name).without_base()
    }

    /// Describe an enumeration backed by `underlying`
    pub fn enumeration(
        namespace: impl Into<String>,
        name: impl Into<String>,
        underlying: BuiltinType,
    ) -> Self {
        TypeBuilder::new(TypeCategory::Enum(underlying), namespace, name).build()
    }

    /// Start describing a closed generic type over `arguments`
    ///
    /// The argument count must match the definition's arity.
    pub fn closed(definition: &TypeDescriptor, arguments: Vec<TypeDescriptor>) -> TypeBuilder {
        debug_assert_eq!(definition.generic_arity(), arguments.len());
        let mut builder = TypeBuilder::new(
            definition.category(),
            definition.namespace().unwrap_or_default(),
            definition.name(),
        );
        if definition.is_interface() {
            builder = builder.without_base();
        }
        builder.data.generic_arity = definition.generic_arity();
        builder.data.generic_definition = Some(definition.clone());
        builder.data.generic_arguments = arguments;
        builder
    }

    /// Close this generic definition over `arguments`
    pub fn make_generic(&self, arguments: Vec<TypeDescriptor>) -> Self {
        Self::closed(self, arguments).build()
    }

    // === Identity ===

    pub fn category(&self) -> TypeCategory {
        self.0.category
    }

    pub fn namespace(&self) -> Option<&str> {
        self.0.namespace.as_deref()
    }

    /// Simple name without namespace or generic arguments
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Namespace-qualified name, including generic arguments
    pub fn qualified_name(&self) -> String {
        let base = match &self.0.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.0.name),
            _ => self.0.name.clone(),
        };
        self.with_generic_suffix(base, |t| t.qualified_name())
    }

    /// Short name including generic arguments, e.g. `Nullable<Int32>`
    pub fn display_name(&self) -> String {
        self.with_generic_suffix(self.0.name.clone(), |t| t.display_name())
    }

    fn with_generic_suffix(&self, base: String, render: impl Fn(&TypeDescriptor) -> String) -> String {
        if !self.0.generic_arguments.is_empty() {
            let args: Vec<String> = self.0.generic_arguments.iter().map(render).collect();
            format!("{}<{}>", base, args.join(", "))
        } else if self.0.generic_arity > 0 {
            format!("{}<{}>", base, ",".repeat(self.0.generic_arity - 1))
        } else {
            base
        }
    }

    // === Shape ===

    /// The builtin this descriptor stands for, if any
    pub fn builtin(&self) -> Option<BuiltinType> {
        match self.0.category {
            TypeCategory::Builtin(b) => Some(b),
            _ => None,
        }
    }

    /// Check for a specific builtin type
    pub fn is(&self, builtin: BuiltinType) -> bool {
        self.builtin() == Some(builtin)
    }

    /// Builtin code used by the widening table; enums report their underlying type
    pub fn type_code(&self) -> Option<BuiltinType> {
        match self.0.category {
            TypeCategory::Builtin(b) | TypeCategory::Enum(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        self.is(BuiltinType::Object)
    }

    pub fn is_value_type(&self) -> bool {
        match self.0.category {
            TypeCategory::Builtin(b) => b.is_value_type(),
            TypeCategory::Enum(_) | TypeCategory::Struct => true,
            TypeCategory::Class | TypeCategory::Interface => false,
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.0.category, TypeCategory::Enum(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.0.category, TypeCategory::Interface)
    }

    /// Underlying integral type of an enum
    pub fn enum_underlying_type(&self) -> Option<TypeDescriptor> {
        match self.0.category {
            TypeCategory::Enum(b) => Some(Self::of(b)),
            _ => None,
        }
    }

    /// Open generic definition (e.g. `List<>`)
    pub fn is_generic_definition(&self) -> bool {
        self.0.generic_arity > 0 && self.0.generic_arguments.is_empty()
    }

    /// Closed generic type (e.g. `List<Int32>`)
    pub fn is_generic(&self) -> bool {
        !self.0.generic_arguments.is_empty()
    }

    pub fn generic_arity(&self) -> usize {
        self.0.generic_arity
    }

    pub fn generic_definition(&self) -> Option<&TypeDescriptor> {
        self.0.generic_definition.as_ref()
    }

    pub fn generic_arguments(&self) -> &[TypeDescriptor] {
        &self.0.generic_arguments
    }

    pub fn base_type(&self) -> Option<&TypeDescriptor> {
        self.0.base.as_ref()
    }

    /// Directly implemented interfaces
    pub fn interfaces(&self) -> &[TypeDescriptor] {
        &self.0.interfaces
    }

    /// Members declared on this type
    pub fn members(&self) -> &[MemberInfo] {
        &self.0.members
    }

    /// Find a member by name on this type or any of its base classes
    pub fn find_member(&self, name: &str) -> Option<&MemberInfo> {
        let mut current = Some(self);
        while let Some(ty) = current {
            if let Some(member) = ty.0.members.iter().find(|m| m.name == name) {
                return Some(member);
            }
            current = ty.base_type();
        }
        None
    }

    // === Numeric classification ===

    /// Cached numeric family
    pub fn numeric_kind(&self) -> NumericKind {
        self.0.numeric_kind
    }

    pub fn is_numeric(&self) -> bool {
        self.0.numeric_kind != NumericKind::NotNumeric
    }

    pub fn is_signed_integral(&self) -> bool {
        self.0.numeric_kind == NumericKind::Signed
    }

    pub fn is_unsigned_integral(&self) -> bool {
        self.0.numeric_kind == NumericKind::Unsigned
    }

    // === Nullability ===

    /// `Nullable<T>` over a value type
    pub fn is_nullable(&self) -> bool {
        self.0.generic_arguments.len() == 1
            && self
                .generic_definition()
                .is_some_and(|def| *def == *NULLABLE)
    }

    /// The `T` of `Nullable<T>`
    pub fn nullable_payload(&self) -> Option<&TypeDescriptor> {
        if self.is_nullable() {
            self.0.generic_arguments.first()
        } else {
            None
        }
    }

    /// Strip a `Nullable<>` wrapper; identity for everything else
    pub fn unwrap_nullable(&self) -> TypeDescriptor {
        self.nullable_payload().cloned().unwrap_or_else(|| self.clone())
    }

    /// Wrap a value type in `Nullable<>`; reference types and nullable types are returned as-is
    pub fn wrap_nullable(&self) -> TypeDescriptor {
        if self.is_value_type() && !self.is_nullable() {
            NULLABLE.make_generic(vec![self.clone()])
        } else {
            self.clone()
        }
    }

    /// Whether a value of this type may be null
    pub fn can_be_null(&self) -> bool {
        !self.is_value_type() || self.is_nullable()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.category == other.0.category
                && self.0.namespace == other.0.namespace
                && self.0.name == other.0.name
                && self.0.generic_arity == other.0.generic_arity
                && self.0.generic_arguments == other.0.generic_arguments)
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.namespace.hash(state);
        self.0.name.hash(state);
        self.0.generic_arguments.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.qualified_name())
    }
}

impl From<BuiltinType> for TypeDescriptor {
    fn from(builtin: BuiltinType) -> Self {
        Self::of(builtin)
    }
}

/// Builder for host-defined types
pub struct TypeBuilder {
    data: TypeData,
    explicit_base: bool,
}

impl TypeBuilder {
    fn new(category: TypeCategory, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            data: TypeData {
                category,
                namespace: (!namespace.is_empty()).then_some(namespace),
                name: name.into(),
                base: None,
                interfaces: Vec::new(),
                generic_arity: 0,
                generic_definition: None,
                generic_arguments: Vec::new(),
                members: Vec::new(),
                numeric_kind: NumericKind::NotNumeric,
            },
            explicit_base: false,
        }
    }

    fn without_base(mut self) -> Self {
        self.explicit_base = true;
        self
    }

    /// Set the base class
    pub fn base(mut self, base: TypeDescriptor) -> Self {
        self.data.base = Some(base);
        self.explicit_base = true;
        self
    }

    /// Add an implemented (or, for interfaces, extended) interface
    pub fn interface(mut self, interface: TypeDescriptor) -> Self {
        self.data.interfaces.push(interface);
        self
    }

    /// Add a property or field
    pub fn member(mut self, name: impl Into<String>, member_type: TypeDescriptor) -> Self {
        self.data.members.push(MemberInfo::new(name, member_type));
        self
    }

    /// Make this an open generic definition with `arity` parameters
    pub fn generic_arity(mut self, arity: usize) -> Self {
        self.data.generic_arity = arity;
        self
    }

    pub fn build(mut self) -> TypeDescriptor {
        // Everything but interfaces and the root derives from object unless told otherwise.
        if !self.explicit_base {
            self.data.base = Some(OBJECT.clone());
        }
        self.data.numeric_kind = compute_numeric_kind(&self.data);
        TypeDescriptor(Arc::new(self.data))
    }
}

fn compute_numeric_kind(data: &TypeData) -> NumericKind {
    let nullable = data.generic_arguments.len() == 1
        && data
            .generic_definition
            .as_ref()
            .is_some_and(|def| *def == *NULLABLE);
    if nullable {
        return data.generic_arguments[0].numeric_kind();
    }
    match data.category {
        TypeCategory::Builtin(b) | TypeCategory::Enum(b) => b.numeric_kind(),
        _ => NumericKind::NotNumeric,
    }
}

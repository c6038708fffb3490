//! Keyword and symbol registry
//!
//! Maps identifiers to literal constants, navigation symbols, function
//! markers and types. Keys are case-insensitive. The registry is built once
//! from a [`ParsingConfig`] and is read-only afterwards.

use indexmap::IndexMap;
use indexmap::map::Entry;

use dynq_ast::{Expr, ExprRef};
use dynq_types::{BuiltinType, LiteralValue, TypeDescriptor};

use crate::ParsingConfig;

/// Navigation symbols for the current, parent and root item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSymbol {
    It,
    Parent,
    Root,
}

impl NavigationSymbol {
    pub const ALL: [Self; 3] = [Self::It, Self::Parent, Self::Root];

    /// Single-character token
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::It => "$",
            Self::Parent => "^",
            Self::Root => "~",
        }
    }

    /// Word alias registered when context keywords are enabled
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Parent => "parent",
            Self::Root => "root",
        }
    }
}

/// Function-like keywords handled by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKeyword {
    Iif,
    IsNull,
    New,
    /// Null-propagation
    Np,
    Is,
    As,
    Cast,
}

impl FunctionKeyword {
    pub const ALL: [Self; 7] = [
        Self::Iif,
        Self::IsNull,
        Self::New,
        Self::Np,
        Self::Is,
        Self::As,
        Self::Cast,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Iif => "iif",
            Self::IsNull => "isnull",
            Self::New => "new",
            Self::Np => "np",
            Self::Is => "is",
            Self::As => "as",
            Self::Cast => "cast",
        }
    }
}

/// What an identifier resolves to
#[derive(Debug, Clone)]
pub enum Keyword {
    /// `true`, `false` or `null`
    Constant(ExprRef),
    Navigation(NavigationSymbol),
    Function(FunctionKeyword),
    Type(TypeDescriptor),
}

impl Keyword {
    pub fn as_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Type(ty) => Some(ty),
            _ => None,
        }
    }
}

/// Shorthand names for builtin types
const TYPE_ALIASES: [(&str, BuiltinType); 15] = [
    ("int", BuiltinType::Int32),
    ("uint", BuiltinType::UInt32),
    ("short", BuiltinType::Int16),
    ("ushort", BuiltinType::UInt16),
    ("long", BuiltinType::Int64),
    ("ulong", BuiltinType::UInt64),
    ("bool", BuiltinType::Boolean),
    ("float", BuiltinType::Single),
    ("sbyte", BuiltinType::SByte),
    ("byte", BuiltinType::Byte),
    ("double", BuiltinType::Double),
    ("decimal", BuiltinType::Decimal),
    ("char", BuiltinType::Char),
    ("string", BuiltinType::String),
    ("object", BuiltinType::Object),
];

/// Well-known enums of the `System` namespace, all backed by `Int32`
const SYSTEM_ENUMS: [&str; 5] = [
    "DayOfWeek",
    "DateTimeKind",
    "StringComparison",
    "UriKind",
    "MidpointRounding",
];

/// Case-insensitive keyword table
#[derive(Debug, Clone)]
pub struct KeywordRegistry {
    entries: IndexMap<String, Keyword>,
}

impl KeywordRegistry {
    /// Build the registry for a configuration
    pub fn new(config: &ParsingConfig) -> Self {
        let mut registry = Self {
            entries: IndexMap::new(),
        };

        registry.add("true", Keyword::Constant(Expr::constant(LiteralValue::Boolean(true))));
        registry.add("false", Keyword::Constant(Expr::constant(LiteralValue::Boolean(false))));
        registry.add("null", Keyword::Constant(Expr::null()));

        for symbol in NavigationSymbol::ALL {
            registry.add(symbol.symbol(), Keyword::Navigation(symbol));
            if config.context_keywords_enabled {
                registry.add(symbol.keyword(), Keyword::Navigation(symbol));
            }
        }

        for function in FunctionKeyword::ALL {
            registry.add(function.name(), Keyword::Function(function));
        }

        for builtin in BuiltinType::ALL {
            registry.add_type(TypeDescriptor::of(builtin));
        }

        for (alias, builtin) in TYPE_ALIASES {
            registry.add(alias, Keyword::Type(TypeDescriptor::of(builtin)));
        }

        if config.support_enumerations_from_system_namespace {
            for name in SYSTEM_ENUMS {
                registry.add_type(TypeDescriptor::enumeration("System", name, BuiltinType::Int32));
            }
        }

        if let Some(provider) = &config.custom_type_provider {
            for ty in provider.custom_types() {
                let short = ty.name().to_string();
                registry.set(&ty.qualified_name(), Keyword::Type(ty.clone()));
                registry.set(&short, Keyword::Type(ty));
            }
        }

        log::debug!(
            "Keyword registry built with {} entries (context keywords: {}, system enums: {}, custom types: {})",
            registry.entries.len(),
            config.context_keywords_enabled,
            config.support_enumerations_from_system_namespace,
            config.custom_type_provider.is_some()
        );

        registry
    }

    /// Resolve an identifier, ignoring case
    pub fn try_resolve(&self, name: &str) -> Option<&Keyword> {
        self.entries.get(name.to_lowercase().as_str())
    }

    /// Resolve an identifier that names a type
    pub fn resolve_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.try_resolve(name).and_then(Keyword::as_type)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.try_resolve(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order, keyed by their lowercase name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Keyword)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Register under the qualified and the short name
    fn add_type(&mut self, ty: TypeDescriptor) {
        let short = ty.name().to_string();
        self.add(&ty.qualified_name(), Keyword::Type(ty.clone()));
        self.add(&short, Keyword::Type(ty));
    }

    /// First registration wins
    fn add(&mut self, name: &str, keyword: Keyword) {
        if let Entry::Vacant(slot) = self.entries.entry(name.to_lowercase()) {
            slot.insert(keyword);
        }
    }

    /// Last registration wins
    fn set(&mut self, name: &str, keyword: Keyword) {
        self.entries.insert(name.to_lowercase(), keyword);
    }
}

impl Default for KeywordRegistry {
    fn default() -> Self {
        Self::new(&ParsingConfig::default())
    }
}

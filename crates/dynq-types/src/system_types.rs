//! Builtin system types

use serde::{Deserialize, Serialize};

/// Numeric classification of a type, computed from its unwrapped form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum NumericKind {
    /// Not a numeric type
    NotNumeric = 0,
    /// Char, Single, Double, Decimal
    Floating = 1,
    /// SByte, Int16, Int32, Int64
    Signed = 2,
    /// Byte, UInt16, UInt32, UInt64
    Unsigned = 3,
}

/// Builtin types of the host type system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinType {
    /// Root of the type hierarchy
    Object,
    Boolean,
    /// UTF-16 code unit
    Char,
    /// Unicode string
    String,
    /// 8-bit signed integer
    SByte,
    /// 8-bit unsigned integer
    Byte,
    /// 16-bit signed integer
    Int16,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Single,
    /// 64-bit float
    Double,
    /// 128-bit decimal
    Decimal,
    /// Date and time without offset
    DateTime,
    /// Date and time with UTC offset
    DateTimeOffset,
    /// Time interval
    TimeSpan,
    /// 128-bit globally unique identifier
    Guid,
    /// Static math helpers
    Math,
    /// Static conversion helpers
    Convert,
}

impl BuiltinType {
    /// Every builtin type, in registration order
    pub const ALL: [BuiltinType; 21] = [
        Self::Object,
        Self::Boolean,
        Self::Char,
        Self::String,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Single,
        Self::Double,
        Self::Decimal,
        Self::DateTime,
        Self::DateTimeOffset,
        Self::TimeSpan,
        Self::Guid,
        Self::Math,
        Self::Convert,
    ];

    /// Get the full qualified name
    pub const fn qualified_name(&self) -> &'static str {
        match self {
            Self::Object => "System.Object",
            Self::Boolean => "System.Boolean",
            Self::Char => "System.Char",
            Self::String => "System.String",
            Self::SByte => "System.SByte",
            Self::Byte => "System.Byte",
            Self::Int16 => "System.Int16",
            Self::UInt16 => "System.UInt16",
            Self::Int32 => "System.Int32",
            Self::UInt32 => "System.UInt32",
            Self::Int64 => "System.Int64",
            Self::UInt64 => "System.UInt64",
            Self::Single => "System.Single",
            Self::Double => "System.Double",
            Self::Decimal => "System.Decimal",
            Self::DateTime => "System.DateTime",
            Self::DateTimeOffset => "System.DateTimeOffset",
            Self::TimeSpan => "System.TimeSpan",
            Self::Guid => "System.Guid",
            Self::Math => "System.Math",
            Self::Convert => "System.Convert",
        }
    }

    /// Get the simple name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Boolean => "Boolean",
            Self::Char => "Char",
            Self::String => "String",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::DateTime => "DateTime",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::TimeSpan => "TimeSpan",
            Self::Guid => "Guid",
            Self::Math => "Math",
            Self::Convert => "Convert",
        }
    }

    /// Value types are copied by value and cannot hold null unless wrapped
    pub const fn is_value_type(&self) -> bool {
        !matches!(self, Self::Object | Self::String | Self::Math | Self::Convert)
    }

    /// Numeric family of this type
    pub const fn numeric_kind(&self) -> NumericKind {
        match self {
            Self::Char | Self::Single | Self::Double | Self::Decimal => NumericKind::Floating,
            Self::SByte | Self::Int16 | Self::Int32 | Self::Int64 => NumericKind::Signed,
            Self::Byte | Self::UInt16 | Self::UInt32 | Self::UInt64 => NumericKind::Unsigned,
            _ => NumericKind::NotNumeric,
        }
    }

    /// Check if this type is an integer of any width
    pub const fn is_integral(&self) -> bool {
        matches!(
            self.numeric_kind(),
            NumericKind::Signed | NumericKind::Unsigned
        )
    }

    /// Check if relational operators are defined on this type
    pub const fn is_ordered(&self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Single
                | Self::Double
                | Self::Decimal
                | Self::DateTime
                | Self::DateTimeOffset
                | Self::TimeSpan
        )
    }

    /// Check if arithmetic operators are defined on this type
    pub const fn is_arithmetic(&self) -> bool {
        self.is_ordered() && !matches!(self, Self::DateTime | Self::DateTimeOffset)
    }

    /// Check if equality operators are defined on this type
    pub const fn has_equality(&self) -> bool {
        !matches!(self, Self::Math | Self::Convert)
    }
}

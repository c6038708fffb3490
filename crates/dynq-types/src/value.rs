//! Literal values carried by constant nodes
//!
//! Equality and hashing are by value: two literals are equal when they hold
//! the same variant and the same payload. Floating-point payloads compare by
//! bit pattern so that every literal can serve as a map key.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use rust_decimal::Decimal;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use crate::{BuiltinType, TypeDescriptor};

/// A literal value
#[derive(Debug, Clone)]
pub enum LiteralValue {
    /// The null reference
    Null,
    Boolean(bool),
    Char(char),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    /// Date and time without offset
    DateTime(NaiveDateTime),
    /// Date and time with a fixed UTC offset
    DateTimeOffset(DateTime<FixedOffset>),
    TimeSpan(TimeDelta),
    Guid(Uuid),
    /// Enum member by its integral value
    Enum {
        enum_type: TypeDescriptor,
        value: i64,
    },
}

impl LiteralValue {
    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create an enum value
    pub fn enumeration(enum_type: TypeDescriptor, value: i64) -> Self {
        Self::Enum { enum_type, value }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Natural type of this value; null is typed as `object`
    pub fn value_type(&self) -> TypeDescriptor {
        let builtin = match self {
            Self::Null => BuiltinType::Object,
            Self::Boolean(_) => BuiltinType::Boolean,
            Self::Char(_) => BuiltinType::Char,
            Self::SByte(_) => BuiltinType::SByte,
            Self::Byte(_) => BuiltinType::Byte,
            Self::Int16(_) => BuiltinType::Int16,
            Self::UInt16(_) => BuiltinType::UInt16,
            Self::Int32(_) => BuiltinType::Int32,
            Self::UInt32(_) => BuiltinType::UInt32,
            Self::Int64(_) => BuiltinType::Int64,
            Self::UInt64(_) => BuiltinType::UInt64,
            Self::Single(_) => BuiltinType::Single,
            Self::Double(_) => BuiltinType::Double,
            Self::Decimal(_) => BuiltinType::Decimal,
            Self::String(_) => BuiltinType::String,
            Self::DateTime(_) => BuiltinType::DateTime,
            Self::DateTimeOffset(_) => BuiltinType::DateTimeOffset,
            Self::TimeSpan(_) => BuiltinType::TimeSpan,
            Self::Guid(_) => BuiltinType::Guid,
            Self::Enum { enum_type, .. } => return enum_type.clone(),
        };
        TypeDescriptor::of(builtin)
    }
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::SByte(a), Self::SByte(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Int16(a), Self::Int16(b)) => a == b,
            (Self::UInt16(a), Self::UInt16(b)) => a == b,
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::UInt32(a), Self::UInt32(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::UInt64(a), Self::UInt64(b)) => a == b,
            (Self::Single(a), Self::Single(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::DateTimeOffset(a), Self::DateTimeOffset(b)) => {
                a == b && a.offset() == b.offset()
            }
            (Self::TimeSpan(a), Self::TimeSpan(b)) => a == b,
            (Self::Guid(a), Self::Guid(b)) => a == b,
            (
                Self::Enum {
                    enum_type: ta,
                    value: a,
                },
                Self::Enum {
                    enum_type: tb,
                    value: b,
                },
            ) => ta == tb && a == b,
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl Hash for LiteralValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Boolean(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::SByte(v) => v.hash(state),
            Self::Byte(v) => v.hash(state),
            Self::Int16(v) => v.hash(state),
            Self::UInt16(v) => v.hash(state),
            Self::Int32(v) => v.hash(state),
            Self::UInt32(v) => v.hash(state),
            Self::Int64(v) => v.hash(state),
            Self::UInt64(v) => v.hash(state),
            Self::Single(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::Decimal(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::DateTime(v) => v.hash(state),
            Self::DateTimeOffset(v) => {
                v.hash(state);
                v.offset().local_minus_utc().hash(state);
            }
            Self::TimeSpan(v) => v.hash(state),
            Self::Guid(v) => v.hash(state),
            Self::Enum { enum_type, value } => {
                enum_type.hash(state);
                value.hash(state);
            }
        }
    }
}

/// Culture-invariant source rendering
impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Char(c) => write!(f, "'{}'", c.escape_default()),
            Self::SByte(v) => write!(f, "{}", v),
            Self::Byte(v) => write!(f, "{}", v),
            Self::Int16(v) => write!(f, "{}", v),
            Self::UInt16(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::UInt32(v) => write!(f, "{}U", v),
            Self::Int64(v) => write!(f, "{}L", v),
            Self::UInt64(v) => write!(f, "{}UL", v),
            Self::Single(v) => write!(f, "{}F", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}M", v),
            Self::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::DateTimeOffset(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::TimeSpan(ts) => write_time_span(f, ts),
            Self::Guid(g) => write!(f, "{}", g.hyphenated()),
            Self::Enum { enum_type, value } => write!(f, "{}.{}", enum_type.name(), value),
        }
    }
}

/// `[-][d.]hh:mm:ss[.fffffff]`
fn write_time_span(f: &mut fmt::Formatter<'_>, ts: &TimeDelta) -> fmt::Result {
    let negative = *ts < TimeDelta::zero();
    let abs = if negative { -*ts } else { *ts };
    let days = abs.num_days();
    let hours = abs.num_hours() % 24;
    let minutes = abs.num_minutes() % 60;
    let seconds = abs.num_seconds() % 60;
    let ticks = (abs - TimeDelta::seconds(abs.num_seconds()))
        .num_nanoseconds()
        .unwrap_or(0)
        / 100;

    if negative {
        write!(f, "-")?;
    }
    if days > 0 {
        write!(f, "{}.", days)?;
    }
    write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)?;
    if ticks > 0 {
        write!(f, ".{:07}", ticks)?;
    }
    Ok(())
}

// === Invariant parsing ===

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date/time string independent of locale
///
/// Strings carrying an offset are normalized to UTC.
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Parse a date/time with offset; offset-less strings are taken as UTC
pub fn parse_date_time_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text.trim()) {
        return Some(dt);
    }
    let naive = parse_date_time(text)?;
    FixedOffset::east_opt(0).map(|utc| utc.from_utc_datetime(&naive))
}

/// Parse a GUID in hyphenated, simple, braced or URN form
pub fn parse_guid(text: &str) -> Option<Uuid> {
    Uuid::parse_str(text.trim()).ok()
}

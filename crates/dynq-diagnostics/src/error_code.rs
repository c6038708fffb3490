//! Numbered dynq error codes
//!
//! - DQ0001-DQ0099: an identifier or type name did not resolve
//! - DQ0100-DQ0199: a node could not be built from its operands
//! - DQ0400-DQ0499: configuration input was rejected

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// A numbered error code, rendered as `DQ0100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Description and help text; unknown codes share a generic entry
    pub fn info(&self) -> &'static ErrorInfo {
        CODE_TABLE.get(&self.0).unwrap_or(&UNKNOWN)
    }

    pub const fn is_resolution_error(&self) -> bool {
        matches!(self.0, 1..=99)
    }

    pub const fn is_build_error(&self) -> bool {
        matches!(self.0, 100..=199)
    }

    pub const fn is_system_error(&self) -> bool {
        matches!(self.0, 400..=499)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DQ{:04}", self.0)
    }
}

/// Text attached to an error code
#[derive(Debug, Clone, Copy)]
pub struct ErrorInfo {
    pub description: &'static str,
    /// Hint shown under the message, if any
    pub help: Option<&'static str>,
}

const fn entry(description: &'static str, help: Option<&'static str>) -> ErrorInfo {
    ErrorInfo { description, help }
}

static UNKNOWN: ErrorInfo = entry("Unknown error", None);

static CODE_TABLE: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    HashMap::from([
        (
            1,
            entry(
                "Unresolved identifier",
                Some("Check that the identifier is a keyword, a registered type or a member"),
            ),
        ),
        (2, entry("Unresolved type", None)),
        (
            100,
            entry(
                "Type mismatch",
                Some("Both operands of a binary operator must share one type after widening"),
            ),
        ),
        (101, entry("Operator not defined for operand types", None)),
        (102, entry("Invalid conversion", None)),
        (103, entry("Member not found", None)),
        (104, entry("Invalid argument count", None)),
        (105, entry("Invalid argument type", None)),
        (
            406,
            entry(
                "Invalid configuration format",
                Some("Configuration documents are JSON objects with boolean flags"),
            ),
        ),
    ])
});

pub const DQ0001: ErrorCode = ErrorCode::new(1);
pub const DQ0002: ErrorCode = ErrorCode::new(2);

pub const DQ0100: ErrorCode = ErrorCode::new(100);
pub const DQ0101: ErrorCode = ErrorCode::new(101);
pub const DQ0102: ErrorCode = ErrorCode::new(102);
pub const DQ0103: ErrorCode = ErrorCode::new(103);
pub const DQ0104: ErrorCode = ErrorCode::new(104);
pub const DQ0105: ErrorCode = ErrorCode::new(105);

pub const DQ0406: ErrorCode = ErrorCode::new(406);

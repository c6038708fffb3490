//! dynq error types

use crate::{DQ0100, DQ0101, DQ0102, DQ0103, DQ0406, ErrorCode};
use thiserror::Error;

/// Main dynq error type
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Identifier or type could not be resolved
    #[error("{code}: {message}")]
    Resolution {
        code: ErrorCode,
        message: String,
        name: String,
    },

    /// A node could not be constructed from its operands
    #[error("{code}: {message}")]
    Build {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// Invalid configuration input
    #[error("{code}: {message}")]
    Config { code: ErrorCode, message: String },
}

impl QueryError {
    /// Create a resolution error
    pub fn resolution(code: ErrorCode, name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Resolution {
            code,
            message: format!("{} '{}'", code.info().description, name),
            name,
        }
    }

    /// Create a build error
    pub fn build(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Build {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error
    pub fn config(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
        }
    }

    /// Operands of a binary node do not share a type
    pub fn type_mismatch(operator: &str, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::build(
            DQ0100,
            format!(
                "The binary operator {} is not defined for the types '{}' and '{}'",
                operator,
                left.into(),
                right.into()
            ),
        )
    }

    /// Operator is not defined for the (matching) operand type
    pub fn operator_not_defined(operator: &str, operand: impl Into<String>) -> Self {
        Self::build(
            DQ0101,
            format!(
                "The operator {} is not defined for the type '{}'",
                operator,
                operand.into()
            ),
        )
    }

    /// No conversion exists between two types
    pub fn invalid_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::build(
            DQ0102,
            format!(
                "No conversion is defined between the types '{}' and '{}'",
                from.into(),
                to.into()
            ),
        )
    }

    /// Member lookup failed
    pub fn member_not_found(member: &str, on_type: impl Into<String>) -> Self {
        Self::build(
            DQ0103,
            format!("No member '{}' exists on type '{}'", member, on_type.into()),
        )
    }

    /// Configuration document could not be read
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::config(DQ0406, message)
    }

    /// Attach context to a build error. Other variants are returned unchanged.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::Build { code, message, .. } => Self::Build {
                code,
                message,
                context: Some(context.into()),
            },
            other => other,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Resolution { code, .. } => *code,
            Self::Build { code, .. } => *code,
            Self::Config { code, .. } => *code,
        }
    }

    /// Get the error context if available
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Build { context, .. } => context.as_deref(),
            _ => None,
        }
    }
}

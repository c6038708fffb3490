//! Binary operators of the expression tree

use serde::{Deserialize, Serialize};

/// Binary operators with their node-construction rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    // Equality
    /// Equality
    Equal,
    /// Inequality
    NotEqual,

    // Relational
    /// Less than
    LessThan,
    /// Less than or equal
    LessThanOrEqual,
    /// Greater than
    GreaterThan,
    /// Greater than or equal
    GreaterThanOrEqual,

    // Arithmetic
    /// Addition
    Add,
    /// Subtraction
    Subtract,
    /// Multiplication
    Multiply,
    /// Division
    Divide,
    /// Remainder
    Modulo,

    // Logical
    /// Bitwise or non-short-circuit logical and
    And,
    /// Bitwise or non-short-circuit logical or
    Or,
    /// Short-circuit conditional and
    AndAlso,
    /// Short-circuit conditional or
    OrElse,
}

impl BinaryOperator {
    /// Check if this is `==` or `!=`
    pub const fn is_equality(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// Check if this is an ordering comparison
    pub const fn is_relational(&self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual
        )
    }

    /// Check if this operator produces a Boolean regardless of operand type
    pub const fn is_comparison(&self) -> bool {
        self.is_equality() || self.is_relational()
    }

    /// Check if this is an arithmetic operator
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo
        )
    }

    /// Check if this is a short-circuit operator
    pub const fn is_short_circuit(&self) -> bool {
        matches!(self, Self::AndAlso | Self::OrElse)
    }

    /// Get the operator symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::And => "&",
            Self::Or => "|",
            Self::AndAlso => "&&",
            Self::OrElse => "||",
        }
    }

    /// Operator name used in diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::LessThan => "LessThan",
            Self::LessThanOrEqual => "LessThanOrEqual",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanOrEqual => "GreaterThanOrEqual",
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Modulo => "Modulo",
            Self::And => "And",
            Self::Or => "Or",
            Self::AndAlso => "AndAlso",
            Self::OrElse => "OrElse",
        }
    }
}

//! Dynamic query-expression compiler
//!
//! This crate turns resolved identifiers, literals and operators into typed
//! expression trees:
//! - A case-insensitive keyword and type registry
//! - Numeric widening and type compatibility rules
//! - Operator-specific node construction (string compare, enums, null guards)
//! - A literal cache for query parameterization
//!
//! # Example
//!
//! ```
//! use dynq::{Expr, LiteralValue, ParsingConfig, QuerySession};
//!
//! let session = QuerySession::new(ParsingConfig::default());
//! let created = Expr::parameter("created", session.require_type("DateTime")?);
//! let date = Expr::constant(LiteralValue::string("2024-01-01"));
//!
//! let filter = session.generator().generate_equal(&created, &date)?;
//! assert_eq!(filter.to_string(), "(created == 2024-01-01T00:00:00)");
//! # Ok::<(), dynq::QueryError>(())
//! ```

// Re-export all public APIs from internal crates
pub use dynq_ast as ast;
pub use dynq_compiler as compiler;
pub use dynq_diagnostics as diagnostics;
pub use dynq_types as types;

// Convenience re-exports
pub use dynq_ast::{BinaryOperator, Expr, ExprKind, ExprRef};
pub use dynq_compiler::{
    ExpressionGenerator, Keyword, KeywordRegistry, LiteralCache, NullGuard, ParsingConfig,
    TypeProvider,
};
pub use dynq_diagnostics::{QueryError, Result};
pub use dynq_types::{LiteralValue, TypeCoercer, TypeDescriptor};

mod session;

pub use session::QuerySession;

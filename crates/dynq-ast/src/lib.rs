//! Expression tree for dynq
//!
//! This crate defines the typed, immutable nodes that the expression
//! generator produces and the downstream engine consumes.

mod expression;
mod operator;

pub use expression::*;
pub use operator::*;

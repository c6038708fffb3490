//! dynq expression compiler
//!
//! This crate provides:
//! - Parsing configuration and the type provider seam
//! - The case-insensitive keyword and symbol registry
//! - The literal cache used for query parameterization
//! - The expression generator that combines sub-expressions into typed nodes

mod config;
mod constant_cache;
mod generator;
mod keywords;

pub use config::*;
pub use constant_cache::*;
pub use generator::*;
pub use keywords::*;

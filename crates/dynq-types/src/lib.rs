//! dynq type system
//!
//! This crate defines the host type model used by the expression compiler:
//! - Builtin system types and their numeric classification
//! - Type descriptors for enums, classes, structs, interfaces and generics
//! - Type compatibility rules (numeric widening, nullable handling, hierarchy walks)
//! - Literal values carried by constant nodes

pub mod coercion;
pub mod member;
pub mod system_types;
pub mod type_system;
pub mod value;

pub use coercion::*;
pub use member::*;
pub use system_types::*;
pub use type_system::*;
pub use value::*;

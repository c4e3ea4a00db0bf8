//! Validated, indexed view of the host semantic model.

pub mod hierarchy;
pub mod semantic_model;
pub mod unit;

pub use hierarchy::TypeHierarchy;
pub use semantic_model::SemanticModel;
pub use unit::{CompilationUnit, UnitBuilder};

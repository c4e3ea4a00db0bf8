//! Attribute resolution: effective tag per declaration.

pub mod attribute_resolver;
pub mod library;

pub use attribute_resolver::AttributeResolver;
pub use library::LibraryTags;

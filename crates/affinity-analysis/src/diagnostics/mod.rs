//! Check findings, the streaming sink, and SARIF rendering.

pub mod sarif;
pub mod sink;
pub mod types;

pub use sink::{DiagnosticSink, TracingSink};
pub use types::{Diagnostic, DiagnosticKind, ParentTag};

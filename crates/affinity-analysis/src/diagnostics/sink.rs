//! DiagnosticSink — where checkers stream findings.

use super::types::Diagnostic;

/// Receives findings as checkers produce them. Implement this to stream
/// diagnostics into the host's reporter instead of collecting a vector.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Logs every finding at `warn` and keeps a count.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub reported: usize,
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        tracing::warn!(
            kind = diagnostic.kind().name(),
            location = diagnostic.location(),
            "{diagnostic}"
        );
    }
}

/// Forwards to two sinks.
impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.report(diagnostic.clone());
        self.1.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affinity_core::ThreadTag;

    #[test]
    fn pair_sink_forwards_to_both() {
        let mut pair: (Vec<Diagnostic>, TracingSink) = (Vec::new(), TracingSink::default());
        pair.report(Diagnostic::UnresolvableAttribute {
            declaration: "A.f".into(),
            tags: vec![ThreadTag::Worker, ThreadTag::Any],
        });
        assert_eq!(pair.0.len(), 1);
        assert_eq!(pair.1.reported, 1);
    }
}

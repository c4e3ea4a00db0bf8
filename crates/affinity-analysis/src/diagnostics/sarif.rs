//! SARIF v2.1.0 rendering of check diagnostics for CI integration.
//!
//! Locations are the host's descriptor strings, so they are emitted as
//! logical locations rather than file regions.

use serde::{Deserialize, Serialize};

use super::types::{Diagnostic, DiagnosticKind};

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";

/// Generate a SARIF report from check diagnostics.
pub fn generate_sarif(diagnostics: &[Diagnostic], tool_name: &str, tool_version: &str) -> SarifReport {
    let rules = build_rules();
    let results = diagnostics.iter().map(build_sarif_result).collect();

    SarifReport {
        schema: SARIF_SCHEMA.to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: tool_name.to_string(),
                    version: tool_version.to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

fn rule_index(kind: DiagnosticKind) -> usize {
    DiagnosticKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default()
}

/// Findings are never downgraded, so every result is an error.
fn build_sarif_result(diagnostic: &Diagnostic) -> SarifResult {
    let kind = diagnostic.kind();
    SarifResult {
        rule_id: kind.code().to_string(),
        rule_index: rule_index(kind),
        level: "error".to_string(),
        message: SarifMessage {
            text: diagnostic.to_string(),
        },
        locations: vec![logical(diagnostic.location())],
        related_locations: related(diagnostic).into_iter().map(logical).collect(),
    }
}

/// The other side of a finding: the parent, callee, or field.
fn related(diagnostic: &Diagnostic) -> Vec<&str> {
    match diagnostic {
        Diagnostic::OverrideConflict { parent, .. } => vec![parent.as_str()],
        Diagnostic::CallSiteViolation { callee, .. } => vec![callee.as_str()],
        Diagnostic::MissingSynchronization { required_by, .. } => vec![required_by.location.as_str()],
        Diagnostic::UnresolvableAttribute { .. } => Vec::new(),
        Diagnostic::InheritanceConflict { parents, .. } => {
            parents.iter().map(|p| p.parent.as_str()).collect()
        }
        Diagnostic::FieldAccessViolation { field, .. } => vec![field.as_str()],
    }
}

fn logical(name: &str) -> SarifLocation {
    SarifLocation {
        logical_locations: vec![SarifLogicalLocation {
            fully_qualified_name: name.to_string(),
        }],
    }
}

fn build_rules() -> Vec<SarifRule> {
    DiagnosticKind::ALL
        .iter()
        .map(|kind| SarifRule {
            id: kind.code().to_string(),
            name: kind.name().to_string(),
            short_description: SarifMessage {
                text: kind.description().to_string(),
            },
        })
        .collect()
}

// --- SARIF data structures ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifReport {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    #[serde(rename = "ruleIndex")]
    pub rule_index: usize,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
    #[serde(rename = "relatedLocations", skip_serializing_if = "Vec::is_empty", default)]
    pub related_locations: Vec<SarifLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "logicalLocations")]
    pub logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifLogicalLocation {
    #[serde(rename = "fullyQualifiedName")]
    pub fully_qualified_name: String,
}

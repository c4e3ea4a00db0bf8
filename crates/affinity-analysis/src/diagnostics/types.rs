//! Diagnostic — one finding from a check pass.

use std::fmt;

use affinity_core::{LocatedTag, ThreadTag};
use serde::Serialize;

/// One tagged parent of a method with several overridden parents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentTag {
    pub parent: String,
    pub tag: LocatedTag,
}

/// A check finding. Every variant is non-fatal; the host decides severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    OverrideConflict {
        child: String,
        parent: String,
        child_tag: Option<LocatedTag>,
        parent_tag: Option<LocatedTag>,
        /// Found through a subclass-wide library tag, without an explicit edge.
        implicit: bool,
    },
    CallSiteViolation {
        caller: String,
        callee: String,
        caller_tag: Option<LocatedTag>,
        callee_tag: Option<LocatedTag>,
        same_instance: bool,
    },
    MissingSynchronization {
        declaration: String,
        required_by: LocatedTag,
    },
    UnresolvableAttribute {
        declaration: String,
        tags: Vec<ThreadTag>,
    },
    InheritanceConflict {
        method: String,
        method_tag: Option<LocatedTag>,
        parents: Vec<ParentTag>,
    },
    FieldAccessViolation {
        accessor: String,
        field: String,
        accessor_tag: Option<LocatedTag>,
        field_tag: Option<LocatedTag>,
    },
}

/// Discriminant of a [`Diagnostic`], usable as a rule id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiagnosticKind {
    OverrideConflict,
    CallSiteViolation,
    MissingSynchronization,
    UnresolvableAttribute,
    InheritanceConflict,
    FieldAccessViolation,
}

impl DiagnosticKind {
    pub const ALL: [DiagnosticKind; 6] = [
        DiagnosticKind::OverrideConflict,
        DiagnosticKind::CallSiteViolation,
        DiagnosticKind::MissingSynchronization,
        DiagnosticKind::UnresolvableAttribute,
        DiagnosticKind::InheritanceConflict,
        DiagnosticKind::FieldAccessViolation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::OverrideConflict => "OverrideConflict",
            Self::CallSiteViolation => "CallSiteViolation",
            Self::MissingSynchronization => "MissingSynchronization",
            Self::UnresolvableAttribute => "UnresolvableAttribute",
            Self::InheritanceConflict => "InheritanceConflict",
            Self::FieldAccessViolation => "FieldAccessViolation",
        }
    }

    /// Stable code handed to the host, like the operational error codes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OverrideConflict => "AFF001",
            Self::CallSiteViolation => "AFF002",
            Self::MissingSynchronization => "AFF003",
            Self::UnresolvableAttribute => "AFF004",
            Self::InheritanceConflict => "AFF005",
            Self::FieldAccessViolation => "AFF006",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::OverrideConflict => "Overriding method runs on a thread its parent does not allow",
            Self::CallSiteViolation => "Call crosses into an incompatible thread context",
            Self::MissingSynchronization => "Declaration requires synchronization but holds no lock",
            Self::UnresolvableAttribute => "Conflicting thread tags on one declaration",
            Self::InheritanceConflict => "Untagged method overrides parents with differing thread tags",
            Self::FieldAccessViolation => "Field accessed from an incompatible thread context",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::OverrideConflict { .. } => DiagnosticKind::OverrideConflict,
            Self::CallSiteViolation { .. } => DiagnosticKind::CallSiteViolation,
            Self::MissingSynchronization { .. } => DiagnosticKind::MissingSynchronization,
            Self::UnresolvableAttribute { .. } => DiagnosticKind::UnresolvableAttribute,
            Self::InheritanceConflict { .. } => DiagnosticKind::InheritanceConflict,
            Self::FieldAccessViolation { .. } => DiagnosticKind::FieldAccessViolation,
        }
    }

    /// Location the host should attach the finding to: the acting side.
    pub fn location(&self) -> &str {
        match self {
            Self::OverrideConflict { child, .. } => child,
            Self::CallSiteViolation { caller, .. } => caller,
            Self::MissingSynchronization { declaration, .. } => declaration,
            Self::UnresolvableAttribute { declaration, .. } => declaration,
            Self::InheritanceConflict { method, .. } => method,
            Self::FieldAccessViolation { accessor, .. } => accessor,
        }
    }
}

struct TagText<'a>(&'a Option<LocatedTag>);

impl fmt::Display for TagText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(tag) => write!(f, "{tag}"),
            None => f.write_str("untagged"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverrideConflict {
                child,
                parent,
                child_tag,
                parent_tag,
                implicit,
            } => {
                write!(
                    f,
                    "{child} ({}) cannot override {parent} ({})",
                    TagText(child_tag),
                    TagText(parent_tag)
                )?;
                if *implicit {
                    f.write_str(" [subclass-wide tag]")?;
                }
                Ok(())
            }
            Self::CallSiteViolation {
                caller,
                callee,
                caller_tag,
                callee_tag,
                ..
            } => write!(
                f,
                "{caller} ({}) cannot call {callee} ({})",
                TagText(caller_tag),
                TagText(callee_tag)
            ),
            Self::MissingSynchronization {
                declaration,
                required_by,
            } => write!(
                f,
                "{declaration} must hold its lock, required by {required_by}"
            ),
            Self::UnresolvableAttribute { declaration, tags } => {
                let names: Vec<&str> = tags.iter().map(ThreadTag::name).collect();
                write!(f, "{declaration} has conflicting tags: {}", names.join(", "))
            }
            Self::InheritanceConflict {
                method,
                method_tag,
                parents,
            } => {
                write!(
                    f,
                    "{method} ({}) overrides parents with differing tags:",
                    TagText(method_tag)
                )?;
                for p in parents {
                    write!(f, " {} ({});", p.parent, p.tag)?;
                }
                Ok(())
            }
            Self::FieldAccessViolation {
                accessor,
                field,
                accessor_tag,
                field_tag,
            } => write!(
                f,
                "{accessor} ({}) cannot access field {field} ({})",
                TagText(accessor_tag),
                TagText(field_tag)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affinity_core::TagAttribute;

    #[test]
    fn call_violation_message_names_both_tags() {
        let d = Diagnostic::CallSiteViolation {
            caller: "Loader.run".into(),
            callee: "Window.show".into(),
            caller_tag: Some(TagAttribute::new(ThreadTag::Worker).located("Loader")),
            callee_tag: Some(TagAttribute::new(ThreadTag::UiEventThread).located("Window.show")),
            same_instance: false,
        };
        assert_eq!(
            d.to_string(),
            "Loader.run (Worker at Loader) cannot call Window.show (UiEventThread at Window.show)"
        );
        assert_eq!(d.kind(), DiagnosticKind::CallSiteViolation);
        assert_eq!(d.location(), "Loader.run");
    }

    #[test]
    fn untagged_side_is_spelled_out() {
        let d = Diagnostic::FieldAccessViolation {
            accessor: "A.f".into(),
            field: "A.x".into(),
            accessor_tag: None,
            field_tag: Some(TagAttribute::new(ThreadTag::Worker).located("A.x")),
        };
        assert!(d.to_string().starts_with("A.f (untagged) cannot access"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let d = Diagnostic::UnresolvableAttribute {
            declaration: "A.f".into(),
            tags: vec![ThreadTag::Worker, ThreadTag::UiEventThread],
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "unresolvable_attribute");
        assert_eq!(json["tags"][1], "UiEventThread");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<&str> = DiagnosticKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), DiagnosticKind::ALL.len());
    }
}

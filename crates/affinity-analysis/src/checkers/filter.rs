//! ScopeFilter — which declarations are exempt from checking as the acting
//! side of an edge.

use affinity_core::config::CheckConfig;
use affinity_core::Declaration;

use crate::model::semantic_model::SemanticModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The declaration, or one enclosing it, carries the suppression token.
    Suppressed,
    /// The declaration lives under an ignored module prefix.
    IgnoredModule,
}

impl SkipReason {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Suppressed => "suppressed",
            Self::IgnoredModule => "ignored_module",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScopeFilter<'c> {
    config: &'c CheckConfig,
}

impl<'c> ScopeFilter<'c> {
    pub fn new(config: &'c CheckConfig) -> Self {
        Self { config }
    }

    pub fn skip_reason(&self, model: &SemanticModel, decl: &Declaration) -> Option<SkipReason> {
        let token = self.config.effective_suppression_token();
        let mut current = Some(decl);
        while let Some(d) = current {
            if d.is_suppressed_by(token) {
                return Some(SkipReason::Suppressed);
            }
            current = d.enclosing.and_then(|id| model.get(id));
        }

        if !self.config.ignore_modules.is_empty() {
            if let Some(module) = model.module_of(decl.id) {
                if self.config.is_module_ignored(&module.qualified_name) {
                    return Some(SkipReason::IgnoredModule);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affinity_core::DeclarationId;

    fn model() -> SemanticModel {
        SemanticModel::build(vec![
            Declaration::module(1, "com.vendor.gen", "gen"),
            Declaration::ty(2, 1, "com.vendor.gen.A", "A"),
            Declaration::method(3, 2, "com.vendor.gen.A.f", "A.f").suppressing("threadchecker"),
            Declaration::ty(4, 3, "com.vendor.gen.A.f$1", "anon"),
            Declaration::method(5, 4, "com.vendor.gen.A.f$1.run", "anon.run"),
            Declaration::method(6, 2, "com.vendor.gen.A.g", "A.g"),
        ])
        .unwrap()
    }

    #[test]
    fn suppression_covers_nested_declarations() {
        let m = model();
        let filter_config = CheckConfig::default();
        let filter = ScopeFilter::new(&filter_config);
        let run = m.get(DeclarationId(5)).unwrap();
        assert_eq!(filter.skip_reason(&m, run), Some(SkipReason::Suppressed));
        assert_eq!(filter.skip_reason(&m, m.get(DeclarationId(6)).unwrap()), None);
    }

    #[test]
    fn ignored_module_prefix() {
        let m = model();
        let config = CheckConfig {
            ignore_modules: vec!["com.vendor".to_string()],
            ..CheckConfig::default()
        };
        let filter = ScopeFilter::new(&config);
        assert_eq!(
            filter.skip_reason(&m, m.get(DeclarationId(6)).unwrap()),
            Some(SkipReason::IgnoredModule)
        );
    }

    #[test]
    fn custom_suppression_token() {
        let m = model();
        let config = CheckConfig {
            suppression_token: Some("affinity".to_string()),
            ..CheckConfig::default()
        };
        let filter = ScopeFilter::new(&config);
        assert_eq!(filter.skip_reason(&m, m.get(DeclarationId(3)).unwrap()), None);
    }
}

//! TagRegistry — location → LocatedTag, one per analysis run.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::Path;

use affinity_core::config::ExportConfig;
use affinity_core::errors::ExportError;
use affinity_core::{is_exportable_location, LocatedTag};

use super::export::{self, ExportSummary};

/// Deduplicated record of resolved marker occurrences, keyed by location.
///
/// Single-writer. Parallel checking gives every unit its own registry and
/// folds them together with [`TagRegistry::merge`] before export.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    entries: BTreeMap<String, LocatedTag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `tag.location`. A location the
    /// table format cannot hold (empty, trailing whitespace, control
    /// characters) is skipped.
    pub fn record(&mut self, tag: LocatedTag) {
        if !is_exportable_location(&tag.location) {
            tracing::warn!(tag = %tag.tag, location = ?tag.location, "skipping tag record with unexportable location");
            return;
        }
        self.entries.insert(tag.location.clone(), tag);
    }

    pub fn get(&self, location: &str) -> Option<&LocatedTag> {
        self.entries.get(location)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in location order.
    pub fn iter(&self) -> btree_map::Values<'_, String, LocatedTag> {
        self.entries.values()
    }

    /// Fold another registry in. Records from `other` overwrite on equal location.
    pub fn merge(&mut self, other: TagRegistry) {
        self.entries.extend(other.entries);
    }

    /// Render the export table, merged over a prior table when given.
    ///
    /// Pure: the same registry and prior bytes always give the same output,
    /// and feeding the output back in as `prior` reproduces it.
    pub fn export_sorted(&self, prior: Option<&[u8]>) -> Result<Vec<u8>, ExportError> {
        let mut table = match prior {
            Some(bytes) => export::parse_table(bytes)?,
            None => BTreeMap::new(),
        };
        for (location, tag) in &self.entries {
            table.insert(location.clone(), tag.tag.name().to_string());
        }
        Ok(export::render_table(&table))
    }

    /// Merge into the table at `path` and rewrite it, under an exclusive lock.
    pub fn export_to_file(&self, path: &Path) -> Result<ExportSummary, ExportError> {
        export::write_locked(self, path)
    }

    /// Export to the configured table path; `None` when no path is set.
    pub fn export_configured(&self, config: &ExportConfig) -> Result<Option<ExportSummary>, ExportError> {
        match &config.tag_table_path {
            Some(path) => self.export_to_file(path).map(Some),
            None => {
                tracing::debug!("no tag table path configured, skipping export");
                Ok(None)
            }
        }
    }
}

//! Tag table export configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Where the sorted tag table is written after a run. No export if unset.
    pub tag_table_path: Option<PathBuf>,
}

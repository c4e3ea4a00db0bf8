//! Export table format and locked file export.
//!
//! One record per line: the location left-padded to [`LOCATION_WIDTH`]
//! columns, a tab, then the tag name. Lines are sorted by raw location.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use affinity_core::errors::ExportError;
use fd_lock::RwLock;

use super::tag_registry::TagRegistry;

pub const LOCATION_WIDTH: usize = 80;

/// Outcome of one file export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Records written, including ones kept from the prior file.
    pub entries: usize,
    /// Records in the prior file that this run did not see.
    pub preserved: usize,
}

/// Parse a prior table into location → tag name. Tag names are kept as text
/// so entries this build cannot interpret survive a rewrite.
pub(crate) fn parse_table(bytes: &[u8]) -> Result<BTreeMap<String, String>, ExportError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ExportError::NotUtf8)?;
    let mut table = BTreeMap::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((padded, tag)) = line.rsplit_once('\t') else {
            return Err(ExportError::MalformedTable {
                line: idx + 1,
                reason: "missing tab separator".to_string(),
            });
        };
        let location = padded.trim_end();
        let tag = tag.trim();
        if location.is_empty() || tag.is_empty() {
            return Err(ExportError::MalformedTable {
                line: idx + 1,
                reason: "empty location or tag".to_string(),
            });
        }
        table.insert(location.to_string(), tag.to_string());
    }
    Ok(table)
}

pub(crate) fn render_table(table: &BTreeMap<String, String>) -> Vec<u8> {
    let mut out = String::new();
    for (location, tag) in table {
        out.push_str(&format!("{:<width$}\t{}\n", location, tag, width = LOCATION_WIDTH));
    }
    out.into_bytes()
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

pub(crate) fn write_locked(registry: &TagRegistry, path: &Path) -> Result<ExportSummary, ExportError> {
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path(path))?;
    let mut lock = RwLock::new(lock_file);
    let _guard = lock.try_write().map_err(|_| ExportError::Locked {
        path: path.display().to_string(),
    })?;

    let prior = match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let preserved = match prior.as_deref() {
        Some(bytes) => parse_table(bytes)?
            .keys()
            .filter(|location| registry.get(location).is_none())
            .count(),
        None => 0,
    };
    let output = registry.export_sorted(prior.as_deref())?;
    fs::write(path, &output)?;

    let entries = output.iter().filter(|&&b| b == b'\n').count();
    tracing::info!(
        path = %path.display(),
        entries,
        preserved,
        "tag table exported"
    );
    Ok(ExportSummary {
        path: path.to_path_buf(),
        entries,
        preserved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_pads_location_column() {
        let mut table = BTreeMap::new();
        table.insert("a.B.c".to_string(), "Worker".to_string());
        let text = String::from_utf8(render_table(&table)).unwrap();
        let (padded, tag) = text.trim_end_matches('\n').split_once('\t').unwrap();
        assert_eq!(padded.len(), LOCATION_WIDTH);
        assert_eq!(padded.trim_end(), "a.B.c");
        assert_eq!(tag, "Worker");
    }

    #[test]
    fn long_locations_are_not_truncated() {
        let long = "x".repeat(LOCATION_WIDTH + 10);
        let mut table = BTreeMap::new();
        table.insert(long.clone(), "Any".to_string());
        let parsed = parse_table(&render_table(&table)).unwrap();
        assert_eq!(parsed.get(&long).map(String::as_str), Some("Any"));
    }

    #[test]
    fn parse_rejects_line_without_tab() {
        let err = parse_table(b"a.B.c Worker\n").unwrap_err();
        assert!(matches!(err, ExportError::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_invalid_utf8() {
        assert!(matches!(parse_table(&[0xff, 0xfe]), Err(ExportError::NotUtf8)));
    }

    #[test]
    fn parse_keeps_unknown_tag_names() {
        let parsed = parse_table(b"old.Thing\tFXPlatform\n\n").unwrap();
        assert_eq!(parsed.get("old.Thing").map(String::as_str), Some("FXPlatform"));
    }

    #[test]
    fn lock_file_sits_next_to_table() {
        assert_eq!(lock_path(Path::new("/tmp/tags.txt")), PathBuf::from("/tmp/tags.txt.lock"));
    }
}

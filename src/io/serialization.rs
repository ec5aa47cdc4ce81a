// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Group sequence serialization and deserialization.
//!
//! This module handles reading and writing coordinate group sequences
//! as pretty-printed JSON arrays, for both the history file and
//! user-chosen export/import files.

use crate::models::group::SavedGroup;
use std::path::Path;
use thiserror::Error;

/// Failures while persisting or transferring group sequences.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no groups to export")]
    Empty,
    #[error("file must contain a JSON array of groups")]
    NotAnArray,
    #[error("malformed group entry: {0}")]
    BadEntry(serde_json::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Write a group sequence to `path` as indented JSON.
pub fn write_groups(groups: &[SavedGroup], path: &Path) -> Result<(), HistoryError> {
    let json = serde_json::to_string_pretty(groups)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a group sequence from `path`.
///
/// The top-level value must be a JSON array; anything else fails with
/// [`HistoryError::NotAnArray`]. Elements are accepted permissively
/// (missing fields default to empty/null) but a non-object entry or a
/// wrong-typed field aborts the whole read with no partial result.
pub fn read_groups(path: &Path) -> Result<Vec<SavedGroup>, HistoryError> {
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let entries = value.as_array().ok_or(HistoryError::NotAnArray)?;

    entries
        .iter()
        .map(|entry| serde_json::from_value(entry.clone()).map_err(HistoryError::BadEntry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::group::Point;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rosemark_ser_{}_{}.json", std::process::id(), name))
    }

    fn sample(name: &str) -> SavedGroup {
        SavedGroup {
            name: name.to_string(),
            origin: Some(Point::new(0, 0)),
            red: Some(Point::new(10, 20)),
            blue: None,
            black: None,
            timestamp: "2025-06-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_write_read_round_trip() {
        let path = temp_path("roundtrip");
        let groups = vec![sample("a"), sample("b")];

        write_groups(&groups, &path).unwrap();
        let back = read_groups(&path).unwrap();
        assert_eq!(back, groups);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_rejects_non_array() {
        let path = temp_path("nonarray");
        std::fs::write(&path, r#"{"not":"a list"}"#).unwrap();

        assert!(matches!(read_groups(&path), Err(HistoryError::NotAnArray)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_accepts_sparse_entries() {
        let path = temp_path("sparse");
        std::fs::write(&path, r#"[{"name":"only a name"}]"#).unwrap();

        let groups = read_groups(&path).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "only a name");
        assert_eq!(groups[0].origin, None);
        assert!(groups[0].timestamp.is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_rejects_malformed_entry() {
        let path = temp_path("badentry");
        std::fs::write(&path, r#"[{"name":"ok"}, {"origin": "not a pair"}]"#).unwrap();

        assert!(matches!(read_groups(&path), Err(HistoryError::BadEntry(_))));

        let _ = std::fs::remove_file(&path);
    }
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved group history.
//!
//! This module manages the insertion-ordered sequence of saved
//! coordinate groups, backed by a local JSON file. The in-memory
//! sequence is authoritative: every mutation persists to disk, but a
//! failed write is logged and never rolled back.

use crate::io::serialization::{self, HistoryError};
use crate::models::group::SavedGroup;
use std::path::{Path, PathBuf};

/// Default history file, created in the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "coordinate_groups_history.json";

/// Insertion-ordered store of saved groups.
///
/// The UI lists groups newest-first, so the `*_display` methods take
/// reverse-insertion-order indices and translate them internally.
pub struct HistoryStore {
    groups: Vec<SavedGroup>,
    path: PathBuf,
}

impl HistoryStore {
    /// Open the store backed by `path`, loading any existing history.
    ///
    /// A missing file starts empty; an unreadable or corrupt file is
    /// logged and also degrades to an empty store rather than failing
    /// startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let groups = if path.exists() {
            match serialization::read_groups(&path) {
                Ok(groups) => {
                    log::info!("Loaded {} groups from {}", groups.len(), path.display());
                    groups
                }
                Err(e) => {
                    log::warn!("Error loading history from {}: {}", path.display(), e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Self { groups, path }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in display order (most recently saved first).
    pub fn iter_display(&self) -> impl Iterator<Item = &SavedGroup> {
        self.groups.iter().rev()
    }

    /// Look up a group by display index.
    pub fn get_display(&self, display_index: usize) -> Option<&SavedGroup> {
        let idx = self.insertion_index(display_index)?;
        self.groups.get(idx)
    }

    /// Append a snapshot and persist the full sequence.
    pub fn append(&mut self, snapshot: SavedGroup) {
        log::info!("Saved group '{}', total: {}", snapshot.name, self.groups.len() + 1);
        self.groups.push(snapshot);
        self.persist();
    }

    /// Remove the group at a display index and persist.
    ///
    /// Returns the removed group, or `None` for an out-of-range index.
    pub fn delete_display(&mut self, display_index: usize) -> Option<SavedGroup> {
        let idx = self.insertion_index(display_index)?;
        let removed = self.groups.remove(idx);
        log::info!("Deleted group '{}', total: {}", removed.name, self.groups.len());
        self.persist();
        Some(removed)
    }

    /// Export the full sequence to a user-chosen file.
    pub fn export_all(&self, path: &Path) -> Result<usize, HistoryError> {
        if self.groups.is_empty() {
            return Err(HistoryError::Empty);
        }
        serialization::write_groups(&self.groups, path)?;
        log::info!("Exported {} groups to {}", self.groups.len(), path.display());
        Ok(self.groups.len())
    }

    /// Import groups from a user-chosen file, appending every entry.
    ///
    /// The file must contain a JSON array; any parse failure aborts
    /// with zero mutation. No de-duplication is performed.
    pub fn import_from(&mut self, path: &Path) -> Result<usize, HistoryError> {
        let imported = serialization::read_groups(path)?;
        let count = imported.len();
        self.groups.extend(imported);
        log::info!("Imported {} groups from {}", count, path.display());
        self.persist();
        Ok(count)
    }

    /// Delete every group and persist. Irreversible.
    pub fn reset(&mut self) {
        self.groups.clear();
        log::info!("History reset");
        self.persist();
    }

    /// Display order is reverse insertion order.
    fn insertion_index(&self, display_index: usize) -> Option<usize> {
        if display_index < self.groups.len() {
            Some(self.groups.len() - 1 - display_index)
        } else {
            None
        }
    }

    fn persist(&self) {
        if let Err(e) = serialization::write_groups(&self.groups, &self.path) {
            log::error!("Error saving history to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::group::Point;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "rosemark_hist_{}_{}.json",
            std::process::id(),
            name
        ))
    }

    fn group(name: &str) -> SavedGroup {
        SavedGroup {
            name: name.to_string(),
            origin: Some(Point::new(1, 1)),
            red: None,
            blue: None,
            black: None,
            timestamp: format!("2025-06-01 12:00:0{}", name.len() % 10),
        }
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let store = HistoryStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_corrupt_file_degrades_to_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{{{ not json").unwrap();
        let store = HistoryStore::open(&path);
        assert!(store.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_append_persists_and_reloads() {
        let path = temp_path("append");
        let _ = std::fs::remove_file(&path);

        let mut store = HistoryStore::open(&path);
        store.append(group("first"));
        store.append(group("second"));

        let reloaded = HistoryStore::open(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get_display(0).unwrap().name, "second");
        assert_eq!(reloaded.get_display(1).unwrap().name, "first");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_delete_display_zero_removes_newest() {
        let path = temp_path("delete_newest");
        let _ = std::fs::remove_file(&path);

        let mut store = HistoryStore::open(&path);
        store.append(group("older"));
        store.append(group("newest"));

        let removed = store.delete_display(0).unwrap();
        assert_eq!(removed.name, "newest");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_display(0).unwrap().name, "older");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_delete_display_maps_to_insertion_index() {
        let path = temp_path("delete_middle");
        let _ = std::fs::remove_file(&path);

        let mut store = HistoryStore::open(&path);
        store.append(group("first"));
        store.append(group("second"));
        store.append(group("third"));

        // Display index 1 of three is insertion index 3-1-1 = 1, the
        // group saved second chronologically.
        let removed = store.delete_display(1).unwrap();
        assert_eq!(removed.name, "second");

        let names: Vec<_> = store.iter_display().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["third", "first"]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let path = temp_path("delete_oob");
        let _ = std::fs::remove_file(&path);

        let mut store = HistoryStore::open(&path);
        store.append(group("only"));
        assert!(store.delete_display(1).is_none());
        assert_eq!(store.len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_empty_store_fails() {
        let path = temp_path("export_empty");
        let export = temp_path("export_empty_out");
        let _ = std::fs::remove_file(&path);

        let store = HistoryStore::open(&path);
        assert!(matches!(
            store.export_all(&export),
            Err(HistoryError::Empty)
        ));
        assert!(!export.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_import_round_trip() {
        let path = temp_path("roundtrip");
        let other = temp_path("roundtrip_other");
        let export = temp_path("roundtrip_out");
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&other);

        let mut store = HistoryStore::open(&path);
        store.append(group("a"));
        store.append(group("b"));
        store.append(group("c"));
        assert_eq!(store.export_all(&export).unwrap(), 3);

        let mut fresh = HistoryStore::open(&other);
        assert_eq!(fresh.import_from(&export).unwrap(), 3);

        let original: Vec<_> = store.iter_display().cloned().collect();
        let imported: Vec<_> = fresh.iter_display().cloned().collect();
        assert_eq!(original, imported);

        for p in [&path, &other, &export] {
            let _ = std::fs::remove_file(p);
        }
    }

    #[test]
    fn test_import_non_array_leaves_store_unchanged() {
        let path = temp_path("import_bad");
        let bad = temp_path("import_bad_src");
        let _ = std::fs::remove_file(&path);
        std::fs::write(&bad, r#"{"not":"a list"}"#).unwrap();

        let mut store = HistoryStore::open(&path);
        store.append(group("keep"));

        assert!(matches!(
            store.import_from(&bad),
            Err(HistoryError::NotAnArray)
        ));
        assert_eq!(store.len(), 1);

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&bad);
    }

    #[test]
    fn test_import_merges_without_dedup() {
        let path = temp_path("import_dup");
        let src = temp_path("import_dup_src");
        let _ = std::fs::remove_file(&path);

        let mut store = HistoryStore::open(&path);
        store.append(group("dup"));
        store.export_all(&src).unwrap();
        store.import_from(&src).unwrap();
        assert_eq!(store.len(), 2);

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&src);
    }

    #[test]
    fn test_reset_clears_and_persists() {
        let path = temp_path("reset");
        let _ = std::fs::remove_file(&path);

        let mut store = HistoryStore::open(&path);
        store.append(group("gone"));
        store.reset();
        assert!(store.is_empty());

        let reloaded = HistoryStore::open(&path);
        assert!(reloaded.is_empty());

        let _ = std::fs::remove_file(&path);
    }
}

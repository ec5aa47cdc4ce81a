// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Coordinate group data structures.
//!
//! This module defines the four-slot annotation being edited in the
//! current session and the immutable saved snapshots kept in history.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D point in original-image pixel space.
///
/// Serialized as a two-element JSON array `[x, y]` to match the
/// history file schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// The four fixed marker roles of a coordinate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    Origin,
    Red,
    Blue,
    Black,
}

impl MarkerRole {
    /// All roles in display order.
    pub const ALL: [MarkerRole; 4] = [
        MarkerRole::Origin,
        MarkerRole::Red,
        MarkerRole::Blue,
        MarkerRole::Black,
    ];

    /// Human-readable label for UI readouts.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerRole::Origin => "Origin",
            MarkerRole::Red => "Red",
            MarkerRole::Blue => "Blue",
            MarkerRole::Black => "Black",
        }
    }

    fn index(&self) -> usize {
        match self {
            MarkerRole::Origin => 0,
            MarkerRole::Red => 1,
            MarkerRole::Blue => 2,
            MarkerRole::Black => 3,
        }
    }
}

/// Validation failures when snapshotting the current group.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("please enter a group name")]
    EmptyName,
    #[error("no coordinates set - mark at least one point")]
    NoCoordinates,
}

/// The mutable group being edited in the current session.
///
/// Slots are stored in a fixed array keyed by [`MarkerRole`], one
/// optional point per role.
#[derive(Debug, Clone, Default)]
pub struct CurrentGroup {
    pub name: String,
    slots: [Option<Point>; 4],
}

impl CurrentGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot, overwriting any existing point for that role.
    pub fn set(&mut self, role: MarkerRole, point: Point) {
        self.slots[role.index()] = Some(point);
    }

    pub fn get(&self, role: MarkerRole) -> Option<Point> {
        self.slots[role.index()]
    }

    /// Empty all four slots and the group name.
    pub fn clear_all(&mut self) {
        self.slots = [None; 4];
        self.name.clear();
    }

    /// True iff no slot holds a point.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Snapshot the current group into an immutable [`SavedGroup`].
    ///
    /// Fails if the trimmed name is empty or no slot is set; neither
    /// failure mutates the current group.
    pub fn to_snapshot(&self, timestamp: String) -> Result<SavedGroup, GroupError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }
        if self.is_empty() {
            return Err(GroupError::NoCoordinates);
        }
        Ok(SavedGroup {
            name: name.to_string(),
            origin: self.get(MarkerRole::Origin),
            red: self.get(MarkerRole::Red),
            blue: self.get(MarkerRole::Blue),
            black: self.get(MarkerRole::Black),
            timestamp,
        })
    }

    /// Replace the current group with a copy of a saved snapshot.
    ///
    /// Clears first, then populates, so stale slots never survive a
    /// load. The name gains a " (copy)" suffix to distinguish the new
    /// working copy from the untouched snapshot.
    pub fn load_from(&mut self, group: &SavedGroup) {
        self.clear_all();
        self.name = format!("{} (copy)", group.name);
        for role in MarkerRole::ALL {
            if let Some(point) = group.get(role) {
                self.set(role, point);
            }
        }
    }
}

/// An immutable saved coordinate group.
///
/// Fields default when absent so permissively-imported entries with
/// missing keys still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub origin: Option<Point>,
    #[serde(default)]
    pub red: Option<Point>,
    #[serde(default)]
    pub blue: Option<Point>,
    #[serde(default)]
    pub black: Option<Point>,
    #[serde(default)]
    pub timestamp: String,
}

impl SavedGroup {
    pub fn get(&self, role: MarkerRole) -> Option<Point> {
        match role {
            MarkerRole::Origin => self.origin,
            MarkerRole::Red => self.red,
            MarkerRole::Blue => self.blue,
            MarkerRole::Black => self.black,
        }
    }
}

/// Format a slot value for readouts and dialogs.
pub fn format_coord(coord: Option<Point>) -> String {
    match coord {
        Some(p) => format!("({}, {})", p.x, p.y),
        None => "Not set".to_string(),
    }
}

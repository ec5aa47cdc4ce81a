// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Group editor and history sidebar.
//!
//! This module provides the right-hand panel: the current group's name
//! and slot readout, and the saved-group history list with its
//! view/load/delete and export/import/reset controls.

use crate::models::group::{format_coord, CurrentGroup, MarkerRole};
use crate::models::history::HistoryStore;

/// Result of sidebar interaction. Indices are display-order indices
/// into the history list (newest first).
pub enum SidebarAction {
    None,
    SaveGroup,
    ClearCurrent,
    ViewGroup(usize),
    LoadGroup(usize),
    DeleteGroup(usize),
    ExportAll,
    Import,
    ResetHistory,
}

/// Display the sidebar and return the requested action.
pub fn show(
    ui: &mut egui::Ui,
    current: &mut CurrentGroup,
    history: &HistoryStore,
    selected: &mut Option<usize>,
) -> SidebarAction {
    let mut action = SidebarAction::None;

    ui.heading("Current Group");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("Group name:");
        ui.text_edit_singleline(&mut current.name);
    });

    ui.add_space(4.0);
    for role in MarkerRole::ALL {
        ui.monospace(format!("{:<7}{}", role.label(), format_coord(current.get(role))));
    }
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        if ui.button("Save Current Group").clicked() {
            action = SidebarAction::SaveGroup;
        }
        if ui.button("Clear Current").clicked() {
            action = SidebarAction::ClearCurrent;
        }
    });

    ui.separator();

    ui.heading("Saved Groups History");
    ui.add_space(4.0);

    // Drop a stale selection when the list shrinks under it.
    if selected.map_or(false, |idx| idx >= history.len()) {
        *selected = None;
    }

    egui::ScrollArea::vertical()
        .max_height((ui.available_height() - 90.0).max(60.0))
        .show(ui, |ui| {
            for (idx, group) in history.iter_display().enumerate() {
                let text = format!("{} - {}", group.name, group.timestamp);
                if ui.selectable_label(*selected == Some(idx), text).clicked() {
                    *selected = Some(idx);
                }
            }
            if history.is_empty() {
                ui.label(egui::RichText::new("No saved groups yet").weak());
            }
        });

    ui.add_space(6.0);
    let has_selection = selected.is_some();
    ui.horizontal(|ui| {
        if ui.add_enabled(has_selection, egui::Button::new("View")).clicked() {
            if let Some(idx) = *selected {
                action = SidebarAction::ViewGroup(idx);
            }
        }
        if ui.add_enabled(has_selection, egui::Button::new("Load")).clicked() {
            if let Some(idx) = *selected {
                action = SidebarAction::LoadGroup(idx);
            }
        }
        if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
            if let Some(idx) = *selected {
                action = SidebarAction::DeleteGroup(idx);
            }
        }
    });

    ui.horizontal(|ui| {
        if ui.button("Export All").clicked() {
            action = SidebarAction::ExportAll;
        }
        if ui.button("Import").clicked() {
            action = SidebarAction::Import;
        }
    });

    if ui.button("Reset All History").clicked() {
        action = SidebarAction::ResetHistory;
    }

    action
}

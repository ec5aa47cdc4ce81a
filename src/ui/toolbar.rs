// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and mode selection UI.
//!
//! This module provides the toolbar for switching between coordinate
//! and drag mode, plus the live coordinate readout and zoom display.

use crate::app::Mode;

/// Display the toolbar with mode selection and status readouts.
pub fn show(ui: &mut egui::Ui, mode: &mut Mode, status: &str, zoom_percent: Option<u32>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");

        ui.separator();

        if ui
            .selectable_label(*mode == Mode::Coordinate, "+ Coordinate")
            .clicked()
        {
            *mode = Mode::Coordinate;
        }

        if ui
            .selectable_label(*mode == Mode::Drag, "✋ Drag (Z)")
            .clicked()
        {
            *mode = Mode::Drag;
        }

        ui.separator();

        let mode_text = match mode {
            Mode::Coordinate => "Hover to read coordinates, keys 1-4 place markers",
            Mode::Drag => "Drag to move the image, scroll to zoom",
        };
        ui.label(egui::RichText::new(mode_text).italics().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(percent) = zoom_percent {
                ui.label(format!("Zoom: {}%", percent));
                ui.separator();
            }
            ui.label(egui::RichText::new(status).strong());
        });
    });
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and marker placement.
//!
//! This module provides the main canvas area where users can view the
//! loaded image under zoom/pan and see the four marker dots.

use crate::app::Mode;
use crate::models::group::{CurrentGroup, MarkerRole, Point};
use crate::util::geometry::ViewState;

const MARKER_RADIUS: f32 = 4.0;

/// Result of canvas interaction for one frame.
#[derive(Default)]
pub struct CanvasResponse {
    /// Pointer position in original-image pixels, `None` when the
    /// pointer is outside the displayed image.
    pub hover: Option<Point>,
    /// Original-image pixel that was clicked this frame, if any.
    pub clicked: Option<Point>,
    /// True while a drag-mode pan is in progress.
    pub dragging: bool,
}

/// Display the canvas and handle pointer interactions.
///
/// Pan and zoom updates are applied to `view` directly; marker
/// placement and coordinate readouts are driven by the returned
/// [`CanvasResponse`].
pub fn show(
    ui: &mut egui::Ui,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    view: &mut ViewState,
    mode: Mode,
    current: &CurrentGroup,
    center_view: &mut bool,
) -> CanvasResponse {
    let mut response = CanvasResponse::default();
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        let (texture, size) = match (image_texture, image_size) {
            (Some(t), Some(s)) => (t, s),
            _ => {
                ui.set_min_size(available_size);
                show_welcome(ui);
                return;
            }
        };

        let (rect, canvas) = ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());

        // Wheel zoom, then derive displayed dimensions for this frame.
        if canvas.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll > 0.0 {
                view.zoom_in();
            } else if scroll < 0.0 {
                view.zoom_out();
            }
        }
        view.recompute(size, (rect.width(), rect.height()));
        if *center_view {
            view.center((rect.width(), rect.height()));
            *center_view = false;
        }

        if mode == Mode::Drag && canvas.dragged() {
            let delta = canvas.drag_delta();
            view.pan_by(delta.x, delta.y);
            response.dragging = true;
        }

        // Pointer positions are canvas-local; the view's pan offset is
        // relative to the canvas origin.
        if let Some(pos) = canvas.hover_pos() {
            response.hover = view.to_original(pos.x - rect.min.x, pos.y - rect.min.y);
        }
        if mode == Mode::Coordinate && canvas.clicked() {
            if let Some(pos) = canvas.interact_pointer_pos() {
                response.clicked = view.to_original(pos.x - rect.min.x, pos.y - rect.min.y);
            }
        }

        let painter = ui.painter_at(rect);

        let image_rect = egui::Rect::from_min_size(
            rect.min + egui::vec2(view.pan.0, view.pan.1),
            egui::vec2(view.display_size.0, view.display_size.1),
        );
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        // Marker dots follow the image through every zoom/pan change:
        // redrawn each frame from their original-pixel coordinates.
        for role in MarkerRole::ALL {
            if let Some(point) = current.get(role) {
                let (dx, dy) = view.to_display(point);
                let center = rect.min + egui::vec2(dx, dy);
                painter.circle_filled(center, MARKER_RADIUS, role_color(role));
                painter.circle_stroke(
                    center,
                    MARKER_RADIUS,
                    egui::Stroke::new(2.0, egui::Color32::WHITE),
                );
            }
        }
    });

    response
}

/// Dot fill color for a marker role. The origin marker renders green
/// so it stands apart from the three color-named roles.
fn role_color(role: MarkerRole) -> egui::Color32 {
    match role {
        MarkerRole::Origin => egui::Color32::from_rgb(0, 160, 0),
        MarkerRole::Red => egui::Color32::RED,
        MarkerRole::Blue => egui::Color32::from_rgb(30, 100, 255),
        MarkerRole::Black => egui::Color32::BLACK,
    }
}

/// Welcome message shown before any image is opened.
fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("rosemark")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Pixel coordinate groups for image digitization")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new(
                    "Open an image, hover to read coordinates, 1-4 to place markers",
                )
                .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Image...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}

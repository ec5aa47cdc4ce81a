// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, managing the overall application state and
//! coordinating between the UI components and the data model.

use crate::io::media::LoadedImage;
use crate::models::{
    group::{format_coord, CurrentGroup, MarkerRole},
    history::{HistoryStore, DEFAULT_HISTORY_FILE},
};
use crate::ui::{canvas, sidebar, toolbar};
use crate::util::geometry::ViewState;
use std::sync::mpsc::{channel, Receiver};

/// Current pointer interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pointer reads coordinates and places markers.
    Coordinate,
    /// Pointer drags pan the image.
    Drag,
}

/// Result of background image loading.
struct LoadedImageData {
    image: LoadedImage,
    file_name: String,
}

/// Main application state.
pub struct RosemarkApp {
    /// Current pointer mode
    mode: Mode,

    /// Group being edited in this session
    current: CurrentGroup,

    /// Saved group history, backed by the local JSON file
    history: HistoryStore,

    /// Zoom/pan/scale of the displayed image
    view: ViewState,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Original image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Pointer position in original pixels, updated every frame
    hover: Option<crate::models::group::Point>,

    /// Status line shown in the toolbar
    status: String,

    /// Selected history entry (display index, newest first)
    selected_group: Option<usize>,

    /// Center the view on the next canvas frame (set on image open)
    center_view: bool,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl Default for RosemarkApp {
    fn default() -> Self {
        Self::new()
    }
}

impl RosemarkApp {
    /// Create a new application instance, loading any existing history.
    pub fn new() -> Self {
        Self {
            mode: Mode::Coordinate,
            current: CurrentGroup::new(),
            history: HistoryStore::open(DEFAULT_HISTORY_FILE),
            view: ViewState::default(),
            image_texture: None,
            image_size: None,
            hover: None,
            status: "Open an image to begin".to_string(),
            selected_group: None,
            center_view: false,
            image_loader: None,
            loading_message: None,
        }
    }

    /// Load an image file and create a texture for display (asynchronously).
    fn load_image_file(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        // Spawn background thread for decoding
        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedImageData, String> {
                let image = crate::io::media::load_image(&path)
                    .map_err(|e| format!("Failed to load image: {}", e))?;

                log::info!(
                    "Loaded image: {} ({}x{})",
                    path.display(),
                    image.width,
                    image.height
                );

                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                Ok(LoadedImageData { image, file_name })
            })();

            let _ = sender.send(result);
        });
    }

    /// Place a marker at the pointer's current position.
    ///
    /// Ignored in drag mode and when the pointer is outside the image.
    fn place_marker(&mut self, role: MarkerRole) {
        if self.mode == Mode::Drag {
            return;
        }
        if let Some(point) = self.hover {
            self.current.set(role, point);
            log::info!("{} marker at ({}, {})", role.label(), point.x, point.y);
        }
    }

    /// Snapshot the current group into history.
    fn save_current_group(&mut self) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        match self.current.to_snapshot(timestamp) {
            Ok(snapshot) => {
                let name = snapshot.name.clone();
                self.history.append(snapshot);
                // Keep the markers for further editing; only the name
                // resets, ready for the next group.
                self.current.name.clear();
                info_dialog("Saved", &format!("Group '{}' saved successfully!", name));
            }
            Err(e) => {
                warn_dialog("Cannot Save", &e.to_string());
            }
        }
    }

    /// Show the full detail of a saved group.
    fn view_group(&self, display_index: usize) {
        if let Some(group) = self.history.get_display(display_index) {
            let details = format!(
                "Group: {}\nSaved: {}\n\nOrigin: {}\nRed:    {}\nBlue:   {}\nBlack:  {}",
                group.name,
                group.timestamp,
                format_coord(group.origin),
                format_coord(group.red),
                format_coord(group.blue),
                format_coord(group.black),
            );
            info_dialog("Group Details", &details);
        }
    }

    /// Copy a saved group into the current working group.
    fn load_group(&mut self, display_index: usize) {
        if let Some(group) = self.history.get_display(display_index) {
            let name = group.name.clone();
            let group = group.clone();
            self.current.load_from(&group);
            log::info!("Loaded group '{}' into current", name);
            info_dialog(
                "Loaded",
                &format!("Group '{}' loaded into current coordinates.", name),
            );
        }
    }

    /// Delete a saved group after confirmation.
    fn delete_group(&mut self, display_index: usize) {
        let name = match self.history.get_display(display_index) {
            Some(group) => group.name.clone(),
            None => return,
        };
        if confirm_dialog("Confirm Delete", &format!("Delete group '{}'?", name)) {
            self.history.delete_display(display_index);
            self.selected_group = None;
        }
    }

    /// Export all saved groups to a user-chosen file.
    fn export_groups(&self) {
        if self.history.is_empty() {
            warn_dialog("No Data", "No groups to export.");
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("coordinate_groups_export.json")
            .save_file()
        {
            match self.history.export_all(&path) {
                Ok(count) => info_dialog(
                    "Success",
                    &format!("Exported {} groups to {}", count, path.display()),
                ),
                Err(e) => {
                    log::error!("Failed to export groups: {}", e);
                    warn_dialog("Export Error", &format!("Failed to export: {}", e));
                }
            }
        }
    }

    /// Import groups from a user-chosen file, merging into history.
    fn import_groups(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match self.history.import_from(&path) {
                Ok(count) => info_dialog("Success", &format!("Imported {} groups.", count)),
                Err(e) => {
                    log::error!("Failed to import groups: {}", e);
                    warn_dialog("Import Error", &format!("Failed to import: {}", e));
                }
            }
        }
    }

    /// Delete all history after confirmation.
    fn reset_history(&mut self) {
        if confirm_dialog(
            "Confirm Reset",
            "Delete ALL saved groups? This cannot be undone!",
        ) {
            self.history.reset();
            self.selected_group = None;
            info_dialog("Reset", "All history has been cleared.");
        }
    }
}

impl eframe::App for RosemarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed image loading
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded) => {
                        let size = [loaded.image.width as usize, loaded.image.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &loaded.image.pixels);
                        let texture = ctx.load_texture(
                            "loaded_image",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );

                        self.image_texture = Some(texture);
                        self.image_size = Some((loaded.image.width, loaded.image.height));
                        self.view = ViewState::default();
                        self.center_view = true;
                        self.status = format!(
                            "Image loaded ({}x{})",
                            loaded.image.width, loaded.image.height
                        );
                        ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                            "rosemark - {}",
                            loaded.file_name
                        )));
                    }
                    Err(e) => {
                        log::error!("Failed to load image: {}", e);
                        self.status = e;
                    }
                }
            }
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export Groups...").clicked() {
                        self.export_groups();
                        ui.close_menu();
                    }
                    if ui.button("Import Groups...").clicked() {
                        self.import_groups();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Keyboard shortcuts, suspended while a text field has focus
        // so typing a group name never places markers.
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::Num1)) {
                self.place_marker(MarkerRole::Red);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Num2)) {
                self.place_marker(MarkerRole::Blue);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Num3)) {
                self.place_marker(MarkerRole::Black);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Num4)) {
                self.place_marker(MarkerRole::Origin);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Z)) {
                self.mode = match self.mode {
                    Mode::Coordinate => Mode::Drag,
                    Mode::Drag => Mode::Coordinate,
                };
                log::info!("Switched to {:?} mode", self.mode);
            }
        }

        // Toolbar
        let zoom_percent = self
            .image_size
            .map(|_| (self.view.zoom * 100.0).round() as u32);
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, &mut self.mode, &self.status, zoom_percent);
        });

        // Group editor and history (right side)
        let sidebar_action = egui::SidePanel::right("sidebar")
            .default_width(300.0)
            .show(ctx, |ui| {
                sidebar::show(
                    ui,
                    &mut self.current,
                    &self.history,
                    &mut self.selected_group,
                )
            })
            .inner;

        match sidebar_action {
            sidebar::SidebarAction::SaveGroup => self.save_current_group(),
            sidebar::SidebarAction::ClearCurrent => {
                self.current.clear_all();
                log::info!("Cleared current group");
            }
            sidebar::SidebarAction::ViewGroup(idx) => self.view_group(idx),
            sidebar::SidebarAction::LoadGroup(idx) => self.load_group(idx),
            sidebar::SidebarAction::DeleteGroup(idx) => self.delete_group(idx),
            sidebar::SidebarAction::ExportAll => self.export_groups(),
            sidebar::SidebarAction::Import => self.import_groups(),
            sidebar::SidebarAction::ResetHistory => self.reset_history(),
            sidebar::SidebarAction::None => {}
        }

        // Main canvas (center)
        let canvas_response = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasResponse::default()
                } else {
                    canvas::show(
                        ui,
                        &self.image_texture,
                        self.image_size,
                        &mut self.view,
                        self.mode,
                        &self.current,
                        &mut self.center_view,
                    )
                }
            })
            .inner;

        self.hover = canvas_response.hover;

        if let Some(point) = canvas_response.clicked {
            log::info!("Clicked at: X={}, Y={}", point.x, point.y);
        }

        if self.image_size.is_some() {
            self.status = match self.mode {
                Mode::Coordinate => match self.hover {
                    Some(p) => format!("X: {}  Y: {}", p.x, p.y),
                    None => "Outside image bounds".to_string(),
                },
                Mode::Drag => {
                    if canvas_response.dragging {
                        "Dragging image...".to_string()
                    } else {
                        "Drag mode active".to_string()
                    }
                }
            };
        }
    }
}

fn info_dialog(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn warn_dialog(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn confirm_dialog(title: &str, message: &str) -> bool {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show()
        == rfd::MessageDialogResult::Yes
}

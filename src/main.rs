// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! rosemark - pixel coordinate group annotator
//!
//! A desktop application for reading pixel coordinates on a loaded
//! image and marking labeled reference points (origin, red, blue,
//! black) into named, persisted coordinate groups.

mod app;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::RosemarkApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("rosemark - Pixel Coordinate Groups"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "rosemark",
        options,
        Box::new(|_cc| Ok(Box::new(RosemarkApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

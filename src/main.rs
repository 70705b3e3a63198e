// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! MemeFactory
//!
//! A cross-platform desktop client for a meme-sharing service: browse the
//! meme feed, comment, and create new memes by placing draggable captions on
//! a picture.

mod app;
mod config;
mod editor;
mod io;
mod models;
mod session;
mod strings;
mod ui;
mod util;

use anyhow::Result;
use app::MemeFactoryApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::load()?;
    let title = config.language().strings().app_title;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title(title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(MemeFactoryApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

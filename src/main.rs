// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Folio - Main Entry Point
//!
//! A small multi-window document viewer built with Rust and egui.

mod app;
mod cli;
mod config;
mod document;
mod error;
mod files;
mod session;
mod theme;
mod ui;

use app::{viewport_builder, FolioApp};
use clap::Parser;
use cli::Cli;
use config::{JsonFileStore, MemoryStore, SettingsStore};
use document::FileBackend;
use log::{info, warn};
use session::WindowRegistry;
use ui::get_app_icon;

/// Application name constant.
const APP_NAME: &str = "Folio";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Starting {}", APP_NAME);

    let store: Box<dyn SettingsStore> = match JsonFileStore::open_default() {
        Ok(store) => {
            info!("Settings file: {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            warn!("Settings will not be kept across runs: {}", e);
            Box::new(MemoryStore::new())
        }
    };

    let mut registry = WindowRegistry::new(store, Box::new(FileBackend::new()));
    let opened = registry.open_paths(&cli.files);
    info!("Opened {} window(s) from the command line", opened.len());

    let app_icon = get_app_icon();
    let viewport = match registry.windows().first() {
        Some(window) => viewport_builder(window, app_icon.as_ref()),
        None => eframe::egui::ViewportBuilder::default().with_title(APP_NAME),
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(FolioApp::new(cc, registry, app_icon)))),
    )
}

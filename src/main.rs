// Hide console window in release builds when launched as a GUI
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod app_data;
mod catalog;
mod chapter;
mod cli;
mod config;
mod filter;
mod state;
mod store;
mod task;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging
    let default_filter = if cli.output.verbose {
        "pyq_chapters=trace,info"
    } else if cli.output.quiet {
        "warn"
    } else {
        "pyq_chapters=debug,info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.command.is_some() {
        return cli::run(cli).await;
    }

    tracing::info!("Starting PYQ Chapters");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 760.0])
        .with_min_inner_size([360.0, 500.0])
        .with_title("PYQ Chapters");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "PYQ Chapters",
        native_options,
        Box::new(|cc| Ok(Box::new(app::DashboardApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}

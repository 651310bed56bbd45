#![deny(clippy::disallowed_methods)]

use eframe::NativeOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use merge_client::{
    MergeClient, MergeError, MergeMode, MergeSettings, MergedVideo, Submission,
    DEFAULT_WEBHOOK_URL,
};
use tracing_subscriber::EnvFilter;

mod duration_input;
use duration_input::{parse_duration_entry, DurationEntry, DurationRule};

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let webhook_url =
        std::env::var("MERGE_WEBHOOK_URL").unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.to_string());
    tracing::info!("Merge webhook: {}", webhook_url);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 720.0])
            .with_min_inner_size([420.0, 520.0]),
        ..NativeOptions::default()
    };
    let _ = eframe::run_native(
        "Video-Audio Merge",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(webhook_url)))),
    );
}

include!("app.rs");

// Submission and result actions extracted from App

use std::path::Path;

use super::App;
use merge_client::{MergeError, MergeRequest, Submission};
use tracing::info;

pub(super) fn start_merge(app: &mut App) {
    if app.video_files.is_empty() {
        // Caught locally; nothing goes over the wire.
        app.error = Some(MergeError::NoVideoSelected.to_string());
        return;
    }
    // A new submission supersedes whatever is on screen.
    app.error = None;
    app.result = None;

    let request = MergeRequest {
        settings: app.settings.clone(),
        video_files: app.video_files.clone(),
        audio_file: app.audio_file.clone(),
    };
    app.submission = Some(Submission::spawn(app.client.clone(), request));
}

pub(super) fn cancel_merge(app: &mut App) {
    if let Some(sub) = app.submission.as_mut() {
        sub.cancel();
    }
}

pub(super) fn play_video(app: &mut App) {
    let Some(video) = app.result.as_ref() else {
        return;
    };
    // Temp-file paths are always absolute, so this cannot fail in practice.
    let Some(url) = result_file_url(video.path()) else {
        return;
    };
    if let Err(err) = webbrowser::open(&url) {
        app.error = Some(format!("Could not open the merged video: {err}"));
    }
}

/// Percent-encoded `file://` URL for the spooled result, so paths with
/// spaces (or Windows separators) survive the hand-off to the system player.
pub(super) fn result_file_url(path: &Path) -> Option<String> {
    url::Url::from_file_path(path).ok().map(String::from)
}

pub(super) fn save_video(app: &mut App) {
    let Some(video) = app.result.as_ref() else {
        return;
    };
    let Some(dest) = rfd::FileDialog::new()
        .set_file_name("merged-video.mp4")
        .save_file()
    else {
        return;
    };
    match video.save_to(&dest) {
        Ok(bytes) => info!("Saved merged video to {} ({} bytes)", dest.display(), bytes),
        Err(err) => app.error = Some(format!("Could not save the merged video: {err}")),
    }
}

// Thin method wrappers so the UI code reads naturally
impl App {
    pub(crate) fn start_merge(&mut self) {
        self::start_merge(self)
    }
    pub(crate) fn cancel_merge(&mut self) {
        self::cancel_merge(self)
    }
    pub(crate) fn play_video(&mut self) {
        self::play_video(self)
    }
    pub(crate) fn save_video(&mut self) {
        self::save_video(self)
    }
}

/// HTTP client for the remote merge webhook
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::error::MergeError;
use crate::result::MergedVideo;
use crate::settings::MergeSettings;

/// Deployment default for the merge webhook. The binary overrides it via
/// the `MERGE_WEBHOOK_URL` environment variable.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://ffmpeg.launchn8n.com/webhook/74f044f6-10d2-481b-93c0-f9b14ecb9b37";

/// Everything one submission carries to the webhook.
#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
    pub settings: MergeSettings,

    /// Source clips; at least one is required.
    pub video_files: Vec<PathBuf>,

    /// Optional soundtrack; at most one.
    pub audio_file: Option<PathBuf>,
}

/// Client for the merge webhook.
///
/// Deliberately carries no timeout: merges can run for minutes and the user
/// holds an explicit cancel path instead (see `Submission`).
#[derive(Clone)]
pub struct MergeClient {
    client: reqwest::Client,
    webhook_url: String,
}

impl MergeClient {
    /// Create a client pointed at `webhook_url`.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Runs one full submission: build the multipart payload, POST it once,
    /// check status and content type, spool the video bytes.
    pub async fn merge(&self, request: &MergeRequest) -> Result<MergedVideo, MergeError> {
        if request.video_files.is_empty() {
            return Err(MergeError::NoVideoSelected);
        }

        info!(
            "Submitting merge: mode={} videos={} audio={}",
            request.settings.merge_mode.as_str(),
            request.video_files.len(),
            request.audio_file.is_some()
        );

        let form = build_form(request).await?;
        let response = self
            .client
            .post(&self.webhook_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(MergeError::from_status(status.as_u16(), body));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("video/") {
            return Err(MergeError::NotAVideo { content_type });
        }

        let bytes = response.bytes().await?;
        debug!("Merge response: {} bytes of {}", bytes.len(), content_type);
        Ok(MergedVideo::from_bytes(&bytes, content_type)?)
    }
}

async fn build_form(request: &MergeRequest) -> Result<Form, MergeError> {
    let settings = &request.settings;
    let mut form = Form::new()
        .text("mergeMode", settings.merge_mode.as_str())
        .text("extraDuration", settings.extra_duration_field())
        .text("fixedDuration", settings.fixed_duration_field());

    if let Some(path) = &request.audio_file {
        form = form.part("audioFile", file_part(path).await?);
    }
    for path in &request.video_files {
        form = form.part("videoFiles", file_part(path).await?);
    }
    Ok(form)
}

async fn file_part(path: &Path) -> Result<Part, MergeError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for_path(path))?;
    Ok(part)
}

/// MIME for a file part, from its extension. The webhook only relies on the
/// broad audio/video split; anything unrecognized goes out as octet-stream.
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("aac") => "audio/aac",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MergeMode;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::extract::{DefaultBodyLimit, Multipart, State};
    use axum::http::{header, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::Router;

    /// What the fake webhook answers with.
    #[derive(Clone)]
    enum Reply {
        Video(&'static [u8]),
        Status(StatusCode, &'static str),
        WrongType(&'static str),
    }

    /// Request evidence collected by the fake webhook.
    #[derive(Clone, Default)]
    struct Seen {
        hits: Arc<AtomicUsize>,
        // (field name, file name, bytes) in arrival order
        fields: Arc<Mutex<Vec<(String, Option<String>, Vec<u8>)>>>,
    }

    async fn webhook(
        State((seen, reply)): State<(Seen, Reply)>,
        mut multipart: Multipart,
    ) -> Response {
        seen.hits.fetch_add(1, Ordering::SeqCst);
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(|s| s.to_string());
            let bytes = field.bytes().await.unwrap().to_vec();
            seen.fields.lock().unwrap().push((name, file_name, bytes));
        }
        match reply {
            Reply::Video(bytes) => ([(header::CONTENT_TYPE, "video/mp4")], bytes).into_response(),
            Reply::Status(code, body) => (code, body).into_response(),
            Reply::WrongType(content_type) => {
                ([(header::CONTENT_TYPE, content_type)], "not a video").into_response()
            }
        }
    }

    async fn spawn_webhook(reply: Reply) -> (String, Seen) {
        let seen = Seen::default();
        let app = Router::new()
            .route("/webhook", post(webhook))
            .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
            .with_state((seen.clone(), reply));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/webhook", addr), seen)
    }

    fn write_media(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_merge_posts_all_fields() {
        let (url, seen) = spawn_webhook(Reply::Video(b"merged bytes")).await;
        let dir = tempfile::tempdir().unwrap();

        let request = MergeRequest {
            settings: MergeSettings {
                merge_mode: MergeMode::FixedDuration,
                extra_duration: None,
                fixed_duration: Some(60),
            },
            video_files: vec![
                write_media(dir.path(), "a.mp4", b"clip a"),
                write_media(dir.path(), "b.mov", b"clip b"),
            ],
            audio_file: Some(write_media(dir.path(), "track.mp3", b"audio")),
        };

        let video = MergeClient::new(url).merge(&request).await.unwrap();
        assert_eq!(video.content_type(), "video/mp4");
        assert_eq!(std::fs::read(video.path()).unwrap(), b"merged bytes");

        let fields = seen.fields.lock().unwrap();
        let names: Vec<&str> = fields.iter().map(|(name, _, _)| name.as_str()).collect();
        assert_eq!(
            names,
            [
                "mergeMode",
                "extraDuration",
                "fixedDuration",
                "audioFile",
                "videoFiles",
                "videoFiles"
            ]
        );
        assert_eq!(fields[0].2, b"fixed_duration");
        assert_eq!(fields[1].2, b"");
        assert_eq!(fields[2].2, b"60");
        assert_eq!(fields[3].1.as_deref(), Some("track.mp3"));
        assert_eq!(fields[4].1.as_deref(), Some("a.mp4"));
        assert_eq!(fields[4].2, b"clip a");
        assert_eq!(fields[5].2, b"clip b");
    }

    #[tokio::test]
    async fn test_audio_field_absent_without_selection() {
        let (url, seen) = spawn_webhook(Reply::Video(b"merged")).await;
        let dir = tempfile::tempdir().unwrap();

        let request = MergeRequest {
            video_files: vec![write_media(dir.path(), "only.mp4", b"clip")],
            ..Default::default()
        };
        MergeClient::new(url).merge(&request).await.unwrap();

        let fields = seen.fields.lock().unwrap();
        assert!(fields.iter().all(|(name, _, _)| name != "audioFile"));
        assert_eq!(fields[0].2, b"match_audio");
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_and_body() {
        let (url, _seen) =
            spawn_webhook(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR, "ffmpeg crashed")).await;
        let dir = tempfile::tempdir().unwrap();

        let request = MergeRequest {
            settings: MergeSettings {
                merge_mode: MergeMode::ExtendVideo,
                extra_duration: Some(15),
                fixed_duration: None,
            },
            video_files: vec![write_media(dir.path(), "clip.mp4", b"clip")],
            audio_file: None,
        };

        let err = MergeClient::new(url).merge(&request).await.unwrap_err();
        assert!(matches!(err, MergeError::Status { .. }));
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("ffmpeg crashed"));
    }

    #[tokio::test]
    async fn test_empty_error_body_reads_placeholder() {
        let (url, _seen) = spawn_webhook(Reply::Status(StatusCode::BAD_GATEWAY, "")).await;
        let dir = tempfile::tempdir().unwrap();

        let request = MergeRequest {
            video_files: vec![write_media(dir.path(), "clip.mp4", b"clip")],
            ..Default::default()
        };

        let err = MergeClient::new(url).merge(&request).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Processing failed with status 502: No response from server."
        );
    }

    #[tokio::test]
    async fn test_non_video_content_type_is_contract_violation() {
        let (url, _seen) = spawn_webhook(Reply::WrongType("text/html; charset=utf-8")).await;
        let dir = tempfile::tempdir().unwrap();

        let request = MergeRequest {
            video_files: vec![write_media(dir.path(), "clip.mp4", b"clip")],
            ..Default::default()
        };

        let err = MergeClient::new(url).merge(&request).await.unwrap_err();
        assert!(matches!(err, MergeError::NotAVideo { .. }));
        assert!(err.to_string().contains("text/html"));
    }

    #[tokio::test]
    async fn test_no_videos_makes_no_request() {
        let (url, seen) = spawn_webhook(Reply::Video(b"unreachable")).await;

        let err = MergeClient::new(url)
            .merge(&MergeRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MergeError::NoVideoSelected));
        assert_eq!(seen.hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("clip.MP4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(mime_for_path(Path::new("track.mp3")), "audio/mpeg");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }
}

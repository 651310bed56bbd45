/// Transient handle to a merged video returned by the webhook
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// A successful merge result, spooled to a named temporary file.
///
/// The backing file lives exactly as long as the handle: dropping the handle
/// (superseded result, reset, app teardown) deletes it. `save_to` copies the
/// bytes out and may be called any number of times while the handle is alive.
#[derive(Debug)]
pub struct MergedVideo {
    file: NamedTempFile,
    content_type: String,
    len: u64,
}

impl MergedVideo {
    /// Spools response bytes into a fresh temp file named after the payload type.
    pub(crate) fn from_bytes(bytes: &[u8], content_type: String) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("merged-video-")
            .suffix(extension_for(&content_type))
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            file,
            content_type,
            len: bytes.len() as u64,
        })
    }

    /// Location of the spooled video, playable by the system player.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Content type the server declared for the payload.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Payload size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies the video to `dest`. The handle stays valid afterwards, so a
    /// user can download the same result more than once.
    pub fn save_to(&self, dest: &Path) -> io::Result<u64> {
        std::fs::copy(self.file.path(), dest)
    }
}

/// File extension matching the declared content type, so external players
/// pick the right demuxer. Unknown video subtypes fall back to `.mp4`.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "video/webm" => ".webm",
        "video/quicktime" => ".mov",
        "video/x-matroska" => ".mkv",
        _ => ".mp4",
    }
}

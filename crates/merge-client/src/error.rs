/// Error taxonomy for one submission against the merge webhook
use thiserror::Error;

/// Everything that can end a submission without a playable result.
///
/// `Cancelled` is the silent outcome: callers clear their busy state and
/// report nothing. Every other variant carries a user-presentable message.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Submission attempted without any video file. No request is made.
    #[error("Please select at least one video file before merging.")]
    NoVideoSelected,

    /// The webhook answered with a non-success status.
    #[error("Processing failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status, but the declared payload type is not a video.
    #[error("Unexpected response from server: The returned file is not a video (type: {content_type}). Please check the webhook configuration.")]
    NotAVideo { content_type: String },

    /// The user aborted the in-flight request.
    #[error("Request cancelled by user.")]
    Cancelled,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MergeError {
    /// Status error with the body text verbatim; an empty body gets the
    /// placeholder so the message never trails off into nothing.
    pub fn from_status(status: u16, body: String) -> Self {
        let body = if body.is_empty() {
            "No response from server.".to_string()
        } else {
            body
        };
        MergeError::Status { status, body }
    }
}

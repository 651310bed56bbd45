/// Client for the remote video-audio merge webhook
///
/// UI glue only: the remote service performs the actual merge. This crate
/// owns the settings model, the multipart submission, the error taxonomy,
/// and the lifetime of the returned video.
pub mod client;
pub mod error;
pub mod result;
pub mod settings;
pub mod submission;

pub use client::{MergeClient, MergeRequest, DEFAULT_WEBHOOK_URL};
pub use error::MergeError;
pub use result::MergedVideo;
pub use settings::{MergeMode, MergeSettings};
pub use submission::{MergeOutcome, Submission};

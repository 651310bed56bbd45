/// Merge mode and settings model for the remote merge webhook
use serde::{Deserialize, Serialize};

/// Duration-reconciliation strategy applied by the remote service.
///
/// The five variants are a closed set; the webhook receives the wire value
/// and everything else about the strategy is opaque to this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeMode {
    /// Video duration follows the audio length
    #[serde(rename = "match_audio")]
    MatchAudio,
    /// Video is extended by a user-provided number of seconds
    #[serde(rename = "extend_video")]
    ExtendVideo,
    /// Both streams are forced to a user-provided total duration
    #[serde(rename = "fixed_duration")]
    FixedDuration,
    /// Audio is trimmed to the video's original length
    #[serde(rename = "trim_audio")]
    TrimAudio,
    /// The shorter stream is looped to match the longer one
    #[serde(rename = "loop_shorter")]
    LoopShorter,
}

impl MergeMode {
    /// All modes in selector order.
    pub const ALL: [MergeMode; 5] = [
        MergeMode::MatchAudio,
        MergeMode::ExtendVideo,
        MergeMode::FixedDuration,
        MergeMode::TrimAudio,
        MergeMode::LoopShorter,
    ];

    /// Wire value sent in the `mergeMode` multipart field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::MatchAudio => "match_audio",
            MergeMode::ExtendVideo => "extend_video",
            MergeMode::FixedDuration => "fixed_duration",
            MergeMode::TrimAudio => "trim_audio",
            MergeMode::LoopShorter => "loop_shorter",
        }
    }

    /// User-facing label for the mode selector.
    pub fn label(&self) -> &'static str {
        match self {
            MergeMode::MatchAudio => "🟢 Match Video to Audio Length",
            MergeMode::ExtendVideo => "🟠 Extend Video by Extra Duration",
            MergeMode::FixedDuration => "🔵 Fixed Custom Duration",
            MergeMode::TrimAudio => "🟣 Trim Audio to Video Length",
            MergeMode::LoopShorter => "🟤 Loop Shorter One",
        }
    }

    /// One-line explanation shown under the selector.
    pub fn explanation(&self) -> &'static str {
        match self {
            MergeMode::MatchAudio => {
                "The video duration will be adjusted to match the audio length."
            }
            MergeMode::ExtendVideo => "The video will be extended by the duration you provide.",
            MergeMode::FixedDuration => {
                "Both video and audio will be set to a fixed, custom duration."
            }
            MergeMode::TrimAudio => "The audio will be trimmed to match the video's original length.",
            MergeMode::LoopShorter => {
                "The shorter of the two files (audio or video) will be looped to match the longer one."
            }
        }
    }

    /// Whether the extra-duration field applies to this mode.
    pub fn needs_extra_duration(&self) -> bool {
        matches!(self, MergeMode::ExtendVideo)
    }

    /// Whether the fixed-duration field applies to this mode.
    pub fn needs_fixed_duration(&self) -> bool {
        matches!(self, MergeMode::FixedDuration)
    }
}

impl Default for MergeMode {
    fn default() -> Self {
        Self::MatchAudio
    }
}

/// One submission's worth of merge choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Selected duration strategy
    pub merge_mode: MergeMode,

    /// Extra seconds appended under `ExtendVideo`; zero is valid.
    /// Ignored by the service under any other mode.
    pub extra_duration: Option<u32>,

    /// Total seconds forced under `FixedDuration`; must be at least one.
    /// Ignored by the service under any other mode.
    pub fixed_duration: Option<u32>,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            merge_mode: MergeMode::MatchAudio,
            extra_duration: None,
            fixed_duration: None,
        }
    }
}

impl MergeSettings {
    /// `extraDuration` field content: decimal seconds, or empty when unset.
    pub fn extra_duration_field(&self) -> String {
        duration_field(self.extra_duration)
    }

    /// `fixedDuration` field content: decimal seconds, or empty when unset.
    pub fn fixed_duration_field(&self) -> String {
        duration_field(self.fixed_duration)
    }
}

fn duration_field(value: Option<u32>) -> String {
    value.map(|secs| secs.to_string()).unwrap_or_default()
}

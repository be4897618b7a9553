pub mod delegate;

pub use delegate::*;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A camera or microphone the page is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordingDevice {
    pub device_type: RecordingDeviceType,
    pub status: RecordingStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordingDeviceType {
    Camera,
    Microphone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordingStatus {
    Inactive,
    Recording,
}

/// Media session metadata as published to observers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork: Option<Arc<RgbaImage>>,
}

/// Set of actions the media session supports, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Feature(u64);

impl Feature {
    pub const NONE: Feature = Feature(0);
    pub const PLAY: Feature = Feature(1 << 0);
    pub const PAUSE: Feature = Feature(1 << 1);
    pub const STOP: Feature = Feature(1 << 2);
    pub const SEEK_TO: Feature = Feature(1 << 3);
    pub const SEEK_FORWARD: Feature = Feature(1 << 4);
    pub const SEEK_BACKWARD: Feature = Feature(1 << 5);
    pub const SKIP_AD: Feature = Feature(1 << 6);
    pub const NEXT_TRACK: Feature = Feature(1 << 7);
    pub const PREVIOUS_TRACK: Feature = Feature(1 << 8);
    pub const FOCUS: Feature = Feature(1 << 9);

    pub const fn from_bits(bits: u64) -> Self {
        Feature(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    pub const fn contains(&self, other: Feature) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Feature {
    type Output = Feature;

    fn bitor(self, rhs: Feature) -> Feature {
        Feature(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Unknown,
    Playing,
    Paused,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionState {
    /// Seconds; may be infinite for live streams.
    pub duration: f64,
    pub position: f64,
    pub playback_rate: f64,
}

/// Details of the media element that went fullscreen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementMetadata {
    pub source: Option<String>,
    pub duration: f64,
    pub width: u64,
    pub height: u64,
    pub audio_track_count: u32,
    pub video_track_count: u32,
}

impl ElementMetadata {
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

/// Playback controls handed to observers when a media session activates.
pub trait MediaSessionController: Send + Sync {
    fn pause(&self);
    fn stop(&self);
    fn play(&self);
    fn seek(&self, time: f64, fast: bool);
    fn seek_forward(&self);
    fn seek_backward(&self);
    fn next_track(&self);
    fn previous_track(&self);
    fn skip_ad(&self);
    fn mute_audio(&self, mute: bool);
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Artwork decode error: {0}")]
    ArtworkDecode(#[from] image::ImageError),
    #[error("Unsupported artwork format: {0}")]
    UnsupportedFormat(String),
    #[error("Artwork unavailable: {0}")]
    ArtworkUnavailable(String),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

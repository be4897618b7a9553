use super::{
    ElementMetadata, Feature, MediaError, MediaSessionController, Metadata, PlaybackState,
    PositionState,
};
use crate::session::{EngineSession, EngineSessionObserver};
use crate::EngineConfig;
use async_trait::async_trait;
use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const ARTWORK_IMAGE_SIZE: u32 = 48;

/// Artwork as offered by the native engine; fetching the pixels may be slow.
#[async_trait]
pub trait NativeArtwork: Send + Sync {
    /// Square bitmap of `size` pixels per side.
    async fn bitmap(&self, size: u32) -> Result<RgbaImage, MediaError>;
}

/// Artwork delivered as encoded image bytes.
pub struct EncodedArtwork {
    bytes: Arc<[u8]>,
}

const SUPPORTED_ARTWORK_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Ico,
];

impl EncodedArtwork {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { bytes: bytes.into() }
    }

    fn decode(bytes: &[u8], size: u32) -> Result<RgbaImage, MediaError> {
        let format = image::guess_format(bytes)?;
        if !SUPPORTED_ARTWORK_FORMATS.contains(&format) {
            return Err(MediaError::UnsupportedFormat(format!("{:?}", format)));
        }

        let decoded = image::load_from_memory_with_format(bytes, format)?;
        Ok(decoded.resize_exact(size, size, FilterType::Triangle).to_rgba8())
    }
}

#[async_trait]
impl NativeArtwork for EncodedArtwork {
    async fn bitmap(&self, size: u32) -> Result<RgbaImage, MediaError> {
        if size == 0 {
            return Err(MediaError::ArtworkUnavailable("requested size is zero".to_string()));
        }

        let bytes = Arc::clone(&self.bytes);
        tokio::task::spawn_blocking(move || Self::decode(&bytes, size)).await?
    }
}

pub struct NativeMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork: Option<Arc<dyn NativeArtwork>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeElementMetadata {
    pub source: Option<String>,
    pub duration: f64,
    pub width: u64,
    pub height: u64,
    pub audio_track_count: u32,
    pub video_track_count: u32,
}

/// Callbacks the native media session delivers.
pub enum NativeMediaEvent {
    Activated(Arc<dyn MediaSessionController>),
    Deactivated,
    Metadata(NativeMetadata),
    Features(u64),
    Play,
    Pause,
    Stop,
    PositionState {
        duration: f64,
        position: f64,
        playback_rate: f64,
    },
    Fullscreen {
        enabled: bool,
        element: Option<NativeElementMetadata>,
    },
}

/// Media session events in the form observers receive them.
#[derive(Clone)]
pub enum MediaSessionEvent {
    Activated(Arc<dyn MediaSessionController>),
    Deactivated,
    MetadataChanged(Metadata),
    FeatureChanged(Feature),
    PlaybackStateChanged(PlaybackState),
    PositionStateChanged(PositionState),
    FullscreenChanged {
        fullscreen: bool,
        element: Option<ElementMetadata>,
    },
}

impl MediaSessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MediaSessionEvent::Activated(_) => "activated",
            MediaSessionEvent::Deactivated => "deactivated",
            MediaSessionEvent::MetadataChanged(_) => "metadata",
            MediaSessionEvent::FeatureChanged(_) => "features",
            MediaSessionEvent::PlaybackStateChanged(_) => "playback-state",
            MediaSessionEvent::PositionStateChanged(_) => "position-state",
            MediaSessionEvent::FullscreenChanged { .. } => "fullscreen",
        }
    }

    pub fn dispatch(&self, observer: &dyn EngineSessionObserver) {
        match self {
            MediaSessionEvent::Activated(controller) => observer.on_media_activated(Arc::clone(controller)),
            MediaSessionEvent::Deactivated => observer.on_media_deactivated(),
            MediaSessionEvent::MetadataChanged(metadata) => observer.on_media_metadata_changed(metadata.clone()),
            MediaSessionEvent::FeatureChanged(features) => observer.on_media_feature_changed(*features),
            MediaSessionEvent::PlaybackStateChanged(state) => observer.on_media_playback_state_changed(*state),
            MediaSessionEvent::PositionStateChanged(state) => observer.on_media_position_state_changed(*state),
            MediaSessionEvent::FullscreenChanged { fullscreen, element } => {
                observer.on_media_fullscreen_changed(*fullscreen, element.clone())
            }
        }
    }
}

/// Translates a native callback. Metadata artwork is not resolved here; see
/// [`MediaSessionDelegate`].
pub fn map_native_event(event: NativeMediaEvent) -> MediaSessionEvent {
    match event {
        NativeMediaEvent::Activated(controller) => MediaSessionEvent::Activated(controller),
        NativeMediaEvent::Deactivated => MediaSessionEvent::Deactivated,
        NativeMediaEvent::Metadata(metadata) => MediaSessionEvent::MetadataChanged(map_metadata(metadata, None)),
        NativeMediaEvent::Features(bits) => MediaSessionEvent::FeatureChanged(Feature::from_bits(bits)),
        NativeMediaEvent::Play => MediaSessionEvent::PlaybackStateChanged(PlaybackState::Playing),
        NativeMediaEvent::Pause => MediaSessionEvent::PlaybackStateChanged(PlaybackState::Paused),
        NativeMediaEvent::Stop => MediaSessionEvent::PlaybackStateChanged(PlaybackState::Stopped),
        NativeMediaEvent::PositionState { duration, position, playback_rate } => {
            MediaSessionEvent::PositionStateChanged(PositionState { duration, position, playback_rate })
        }
        NativeMediaEvent::Fullscreen { enabled, element } => MediaSessionEvent::FullscreenChanged {
            fullscreen: enabled,
            element: element.map(map_element_metadata),
        },
    }
}

pub fn map_metadata(metadata: NativeMetadata, artwork: Option<Arc<RgbaImage>>) -> Metadata {
    Metadata {
        title: metadata.title,
        artist: metadata.artist,
        album: metadata.album,
        artwork,
    }
}

fn map_element_metadata(element: NativeElementMetadata) -> ElementMetadata {
    ElementMetadata {
        source: element.source,
        duration: element.duration,
        width: element.width,
        height: element.height,
        audio_track_count: element.audio_track_count,
        video_track_count: element.video_track_count,
    }
}

/// Republishes native media session callbacks to the observers of an
/// [`EngineSession`].
///
/// Artwork is fetched on the injected runtime and the metadata is published
/// once it is available, so observers see metadata events after the other
/// events delivered at the same time.
pub struct MediaSessionDelegate {
    session: Arc<EngineSession>,
    runtime: Handle,
    artwork_size: u32,
}

impl MediaSessionDelegate {
    pub fn new(session: Arc<EngineSession>, runtime: Handle, config: &EngineConfig) -> Self {
        Self {
            session,
            runtime,
            artwork_size: config.artwork_image_size,
        }
    }

    /// Returns the handle of the background task for metadata events.
    pub fn handle(&self, event: NativeMediaEvent) -> Option<JoinHandle<()>> {
        match event {
            NativeMediaEvent::Metadata(metadata) => Some(self.spawn_metadata(metadata)),
            other => {
                publish(&self.session, map_native_event(other));
                None
            }
        }
    }

    fn spawn_metadata(&self, metadata: NativeMetadata) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        let size = self.artwork_size;

        self.runtime.spawn(async move {
            let artwork = match &metadata.artwork {
                Some(artwork) => match artwork.bitmap(size).await {
                    Ok(bitmap) => Some(Arc::new(bitmap)),
                    Err(e) => {
                        warn!("Media session artwork unavailable: {}", e);
                        None
                    }
                },
                None => None,
            };

            let event = MediaSessionEvent::MetadataChanged(map_metadata(metadata, artwork));
            publish(&session, event);
        })
    }
}

fn publish(session: &EngineSession, event: MediaSessionEvent) {
    debug!("Media session {} event for session {}", event.name(), session.id());
    session.notify_observers(|observer| event.dispatch(observer));
}

use browser_engine_concept::media::*;
use browser_engine_concept::session::{EngineSession, EngineSessionObserver};
use browser_engine_concept::EngineConfig;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use parking_lot::Mutex;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
    metadata: Mutex<Option<Metadata>>,
    features: Mutex<Option<Feature>>,
    position: Mutex<Option<PositionState>>,
    fullscreen: Mutex<Option<(bool, Option<ElementMetadata>)>>,
    controller: Mutex<Option<Arc<dyn MediaSessionController>>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

impl EngineSessionObserver for RecordingObserver {
    fn on_media_activated(&self, controller: Arc<dyn MediaSessionController>) {
        self.events.lock().push("activated".to_string());
        *self.controller.lock() = Some(controller);
    }

    fn on_media_deactivated(&self) {
        self.events.lock().push("deactivated".to_string());
    }

    fn on_media_metadata_changed(&self, metadata: Metadata) {
        self.events.lock().push("metadata".to_string());
        *self.metadata.lock() = Some(metadata);
    }

    fn on_media_feature_changed(&self, features: Feature) {
        *self.features.lock() = Some(features);
    }

    fn on_media_playback_state_changed(&self, state: PlaybackState) {
        self.events.lock().push(format!("{:?}", state));
    }

    fn on_media_position_state_changed(&self, state: PositionState) {
        *self.position.lock() = Some(state);
    }

    fn on_media_fullscreen_changed(&self, fullscreen: bool, element: Option<ElementMetadata>) {
        *self.fullscreen.lock() = Some((fullscreen, element));
    }
}

#[derive(Default)]
struct FakeController {
    pauses: AtomicUsize,
}

impl MediaSessionController for FakeController {
    fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
    fn stop(&self) {}
    fn play(&self) {}
    fn seek(&self, _time: f64, _fast: bool) {}
    fn seek_forward(&self) {}
    fn seek_backward(&self) {}
    fn next_track(&self) {}
    fn previous_track(&self) {}
    fn skip_ad(&self) {}
    fn mute_audio(&self, _mute: bool) {}
}

fn setup() -> (Arc<EngineSession>, Arc<RecordingObserver>, MediaSessionDelegate) {
    let session = Arc::new(EngineSession::new());
    let observer = Arc::new(RecordingObserver::default());
    session.register_observer(observer.clone());
    let delegate = MediaSessionDelegate::new(session.clone(), Handle::current(), &EngineConfig::default());
    (session, observer, delegate)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

#[tokio::test]
async fn test_playback_lifecycle_reaches_observers() {
    let (_session, observer, delegate) = setup();
    let controller = Arc::new(FakeController::default());

    for event in [
        NativeMediaEvent::Activated(controller.clone()),
        NativeMediaEvent::Play,
        NativeMediaEvent::Pause,
        NativeMediaEvent::Stop,
        NativeMediaEvent::Deactivated,
    ] {
        assert!(delegate.handle(event).is_none());
    }

    assert_eq!(
        observer.events(),
        vec!["activated", "Playing", "Paused", "Stopped", "deactivated"]
    );

    observer.controller.lock().as_ref().unwrap().pause();
    assert_eq!(controller.pauses.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_features_position_and_fullscreen() {
    let (_session, observer, delegate) = setup();

    delegate.handle(NativeMediaEvent::Features((Feature::PLAY | Feature::SEEK_TO).bits()));
    delegate.handle(NativeMediaEvent::PositionState { duration: 300.0, position: 12.0, playback_rate: 1.5 });
    delegate.handle(NativeMediaEvent::Fullscreen { enabled: false, element: None });

    let features = observer.features.lock().unwrap();
    assert!(features.contains(Feature::SEEK_TO));
    assert!(!features.contains(Feature::STOP));
    assert_eq!(
        *observer.position.lock(),
        Some(PositionState { duration: 300.0, position: 12.0, playback_rate: 1.5 })
    );
    assert_eq!(*observer.fullscreen.lock(), Some((false, None)));
}

#[tokio::test]
async fn test_metadata_with_artwork_is_resized() {
    let (_session, observer, delegate) = setup();

    let task = delegate
        .handle(NativeMediaEvent::Metadata(NativeMetadata {
            title: Some("Track".to_string()),
            artist: Some("Artist".to_string()),
            album: None,
            artwork: Some(Arc::new(EncodedArtwork::new(png_bytes(200, 120)))),
        }))
        .expect("metadata is published from a background task");
    task.await.unwrap();

    let metadata = observer.metadata.lock().clone().unwrap();
    assert_eq!(metadata.title.as_deref(), Some("Track"));
    assert_eq!(metadata.album, None);
    let artwork = metadata.artwork.unwrap();
    assert_eq!(artwork.dimensions(), (ARTWORK_IMAGE_SIZE, ARTWORK_IMAGE_SIZE));
}

#[tokio::test]
async fn test_metadata_with_broken_artwork_still_published() {
    let (_session, observer, delegate) = setup();

    let task = delegate
        .handle(NativeMediaEvent::Metadata(NativeMetadata {
            title: Some("Track".to_string()),
            artist: None,
            album: None,
            artwork: Some(Arc::new(EncodedArtwork::new(b"not an image".to_vec()))),
        }))
        .unwrap();
    task.await.unwrap();

    let metadata = observer.metadata.lock().clone().unwrap();
    assert!(metadata.artwork.is_none());
    assert_eq!(observer.events(), vec!["metadata"]);
}

#[tokio::test]
async fn test_artwork_size_follows_config() {
    let session = Arc::new(EngineSession::new());
    let observer = Arc::new(RecordingObserver::default());
    session.register_observer(observer.clone());
    let config = EngineConfig {
        artwork_image_size: 16,
        ..Default::default()
    };
    let delegate = MediaSessionDelegate::new(session, Handle::current(), &config);

    let task = delegate
        .handle(NativeMediaEvent::Metadata(NativeMetadata {
            title: None,
            artist: None,
            album: None,
            artwork: Some(Arc::new(EncodedArtwork::new(png_bytes(64, 64)))),
        }))
        .unwrap();
    task.await.unwrap();

    let artwork = observer.metadata.lock().clone().unwrap().artwork.unwrap();
    assert_eq!(artwork.dimensions(), (16, 16));
}

#[tokio::test]
async fn test_unregistered_observer_is_not_notified() {
    let (session, observer, delegate) = setup();
    session.unregister_observers();

    delegate.handle(NativeMediaEvent::Play);

    assert!(observer.events().is_empty());
}

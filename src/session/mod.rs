pub mod state;

pub use state::*;

use crate::media::{
    ElementMetadata, Feature, MediaSessionController, Metadata, PlaybackState, PositionState,
    RecordingDevice,
};
use crate::observer::{ObserverId, ObserverRegistry};
use std::sync::Arc;
use uuid::Uuid;

/// Receives events of an [`EngineSession`]. Every method defaults to doing
/// nothing, so implementors only override what they care about.
#[allow(unused_variables)]
pub trait EngineSessionObserver: Send + Sync {
    fn on_media_activated(&self, controller: Arc<dyn MediaSessionController>) {}

    fn on_media_deactivated(&self) {}

    fn on_media_metadata_changed(&self, metadata: Metadata) {}

    fn on_media_feature_changed(&self, features: Feature) {}

    fn on_media_playback_state_changed(&self, state: PlaybackState) {}

    fn on_media_position_state_changed(&self, state: PositionState) {}

    fn on_media_fullscreen_changed(&self, fullscreen: bool, element: Option<ElementMetadata>) {}

    fn on_recording_state_changed(&self, devices: Vec<RecordingDevice>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl EngineSessionObserver for NullObserver {}

/// Engine-neutral handle of a browsing session. Engine bindings publish
/// events through [`EngineSession::notify_observers`].
pub struct EngineSession {
    id: Uuid,
    observers: ObserverRegistry<dyn EngineSessionObserver>,
}

impl EngineSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            observers: ObserverRegistry::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn register_observer(&self, observer: Arc<dyn EngineSessionObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    pub fn unregister_observers(&self) {
        self.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn notify_observers<F>(&self, mut block: F)
    where
        F: FnMut(&dyn EngineSessionObserver),
    {
        self.observers.notify_observers(|observer| block(observer));
    }
}

impl Default for EngineSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EngineSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSession")
            .field("id", &self.id)
            .field("observers", &self.observers.len())
            .finish()
    }
}

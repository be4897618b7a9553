//! Engine-agnostic browser engine concepts.
//!
//! Applications program against the traits and value types in this crate and
//! plug in an engine binding underneath:
//!  - `manifest` parses web app manifests (icons in particular) tolerantly.
//!  - `session`, `view`, `permission`, `history`, `webnotifications`,
//!    `webpush` and `data` describe what an engine has to provide.
//!  - `media::delegate` bridges native media session callbacks to session
//!    observers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod data;
pub mod history;
pub mod manifest;
pub mod media;
pub mod mediaquery;
pub mod observer;
pub mod permission;
pub mod session;
pub mod view;
pub mod webnotifications;
pub mod webpush;

pub use manifest::{Icon, Purpose, Size, WebAppManifest, WebAppManifestParser};
pub use observer::{ObserverId, ObserverRegistry};
pub use session::{EngineSession, EngineSessionObserver};

#[derive(Error, Debug)]
pub enum ConceptError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] manifest::ManifestError),
    #[error("Session state error: {0}")]
    SessionState(#[from] session::SessionStateError),
    #[error("Media error: {0}")]
    Media(#[from] media::MediaError),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ConceptError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side length in pixels of media session artwork handed to observers.
    pub artwork_image_size: u32,
    pub session_state_dir: PathBuf,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            artwork_image_size: media::ARTWORK_IMAGE_SIZE,
            session_state_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("./data"))
                .join("browser-engine-concept")
                .join("session-state"),
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn session_state_storage(&self) -> session::FileSessionStateStorage {
        session::FileSessionStateStorage::new(self.session_state_dir.clone())
    }
}

/// Installs a global fmt subscriber. Returns `false` if one was already set.
pub fn init_tracing(config: &EngineConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// Engine specific state of a session that can be persisted and restored.
pub trait EngineSessionState: Send + Sync {
    fn to_json(&self) -> Value;

    /// Writes the state as JSON. Read it back with
    /// [`SessionStateSnapshot::read_from`].
    fn write_to(&self, writer: &mut dyn Write) -> Result<(), SessionStateError> {
        serde_json::to_writer(writer, &self.to_json())?;
        Ok(())
    }
}

/// State restored from its JSON form, ready to hand back to an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStateSnapshot {
    value: Value,
}

impl SessionStateSnapshot {
    pub fn from_json(value: Value) -> Self {
        Self { value }
    }

    pub fn read_from(reader: &mut dyn Read) -> Result<Self, SessionStateError> {
        let value = serde_json::from_reader(reader)?;
        Ok(Self { value })
    }

    pub fn as_json(&self) -> &Value {
        &self.value
    }
}

impl EngineSessionState for SessionStateSnapshot {
    fn to_json(&self) -> Value {
        self.value.clone()
    }
}

/// Persistence for [`EngineSessionState`] keyed by session uuid.
#[async_trait]
pub trait EngineSessionStateStorage: Send + Sync {
    /// Returns whether the state was stored.
    async fn write(&self, uuid: &str, state: &dyn EngineSessionState) -> bool;

    async fn read(&self, uuid: &str) -> Option<SessionStateSnapshot>;

    async fn delete(&self, uuid: &str);

    async fn delete_all(&self);
}

#[derive(Default)]
pub struct InMemorySessionStateStorage {
    states: RwLock<HashMap<String, Value>>,
}

impl InMemorySessionStateStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

#[async_trait]
impl EngineSessionStateStorage for InMemorySessionStateStorage {
    async fn write(&self, uuid: &str, state: &dyn EngineSessionState) -> bool {
        self.states.write().insert(uuid.to_string(), state.to_json());
        true
    }

    async fn read(&self, uuid: &str) -> Option<SessionStateSnapshot> {
        self.states.read().get(uuid).cloned().map(SessionStateSnapshot::from_json)
    }

    async fn delete(&self, uuid: &str) {
        self.states.write().remove(uuid);
    }

    async fn delete_all(&self) {
        self.states.write().clear();
    }
}

/// Stores each state as `<uuid>.json` inside a directory.
pub struct FileSessionStateStorage {
    root: PathBuf,
}

const STATE_FILE_EXTENSION: &str = "json";
const TEMP_FILE_EXTENSION: &str = "tmp";

impl FileSessionStateStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn state_path(&self, uuid: &str) -> Result<PathBuf, SessionStateError> {
        let valid = !uuid.is_empty()
            && uuid
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SessionStateError::InvalidId(uuid.to_string()));
        }
        Ok(self.root.join(format!("{}.{}", uuid, STATE_FILE_EXTENSION)))
    }

    async fn try_write(&self, uuid: &str, state: &dyn EngineSessionState) -> Result<(), SessionStateError> {
        let path = self.state_path(uuid)?;
        let mut buffer = Vec::new();
        state.write_to(&mut buffer)?;

        fs::create_dir_all(&self.root).await?;
        // Each write gets its own temp file; the rename replaces the state atomically.
        let tmp = self
            .root
            .join(format!("{}.{}.{}", uuid, Uuid::new_v4(), TEMP_FILE_EXTENSION));
        if let Err(e) = Self::write_and_rename(&tmp, &path, &buffer).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn write_and_rename(tmp: &Path, path: &Path, buffer: &[u8]) -> std::io::Result<()> {
        fs::write(tmp, buffer).await?;
        fs::rename(tmp, path).await
    }

    async fn try_read(&self, uuid: &str) -> Result<SessionStateSnapshot, SessionStateError> {
        let path = self.state_path(uuid)?;
        let bytes = fs::read(&path).await?;
        SessionStateSnapshot::read_from(&mut bytes.as_slice())
    }
}

#[async_trait]
impl EngineSessionStateStorage for FileSessionStateStorage {
    async fn write(&self, uuid: &str, state: &dyn EngineSessionState) -> bool {
        match self.try_write(uuid, state).await {
            Ok(()) => {
                debug!("Stored session state {}", uuid);
                true
            }
            Err(e) => {
                warn!("Failed to store session state {}: {}", uuid, e);
                false
            }
        }
    }

    async fn read(&self, uuid: &str) -> Option<SessionStateSnapshot> {
        match self.try_read(uuid).await {
            Ok(state) => Some(state),
            Err(SessionStateError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read session state {}: {}", uuid, e);
                None
            }
        }
    }

    async fn delete(&self, uuid: &str) {
        let Ok(path) = self.state_path(uuid) else {
            return;
        };
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to delete session state {}: {}", uuid, e);
            }
        }
    }

    async fn delete_all(&self) {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                warn!("Failed to list session states: {}", e);
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to list session states: {}", e);
                    break;
                }
            };
            let path = entry.path();
            let extension = path.extension().and_then(|ext| ext.to_str());
            if extension != Some(STATE_FILE_EXTENSION) && extension != Some(TEMP_FILE_EXTENSION) {
                continue;
            }
            if let Err(e) = fs::remove_file(&path).await {
                warn!("Failed to delete {}: {}", path.display(), e);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid session id: {0}")]
    InvalidId(String),
}

use crate::{ConceptError, Result};
use serde::{Deserialize, Serialize};

/// Kinds of browsing data that can be cleared, as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrowsingData(u32);

impl BrowsingData {
    pub const COOKIES: u32 = 1 << 0;
    pub const NETWORK_CACHE: u32 = 1 << 1;
    pub const IMAGE_CACHE: u32 = 1 << 2;
    pub const DOM_STORAGES: u32 = 1 << 4;
    pub const AUTH_SESSIONS: u32 = 1 << 5;
    pub const PERMISSIONS: u32 = 1 << 6;
    pub const ALL_SITE_SETTINGS: u32 = (1 << 7) | Self::PERMISSIONS;
    pub const ALL_CACHES: u32 = Self::NETWORK_CACHE | Self::IMAGE_CACHE;
    pub const ALL_SITE_DATA: u32 =
        (1 << 8) | Self::COOKIES | Self::DOM_STORAGES | Self::ALL_CACHES | Self::PERMISSIONS | Self::ALL_SITE_SETTINGS;
    pub const ALL: u32 = 1 << 9 | Self::ALL_SITE_DATA | Self::AUTH_SESSIONS;

    pub fn all() -> Self {
        Self(Self::ALL)
    }

    pub fn all_caches() -> Self {
        Self(Self::ALL_CACHES)
    }

    pub fn select(types: &[u32]) -> Self {
        Self(types.iter().fold(0, |acc, t| acc | t))
    }

    pub fn types(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, types: u32) -> bool {
        self.0 & types == types
    }
}

impl Default for BrowsingData {
    fn default() -> Self {
        Self::all()
    }
}

/// Something that stores browsing data an application may want wiped.
#[allow(unused_variables)]
pub trait DataCleanable {
    /// Clears `data` for `host`, or for every host when `host` is `None`.
    fn clear_data(&self, data: BrowsingData, host: Option<&str>) -> Result<()> {
        Err(ConceptError::Unsupported(
            "Clearing browsing data is not supported.".to_string(),
        ))
    }
}

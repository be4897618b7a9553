use serde::{Deserialize, Serialize};

/// A permission a page or the engine may request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    ContentAudioCapture(PermissionInfo),
    ContentAudioMicrophone(PermissionInfo),
    ContentAudioOther(PermissionInfo),
    ContentGeoLocation(PermissionInfo),
    ContentNotification(PermissionInfo),
    ContentProtectedMediaId(PermissionInfo),
    ContentVideoCamera(PermissionInfo),
    ContentVideoCapture(PermissionInfo),
    ContentVideoScreen(PermissionInfo),
    ContentVideoOther(PermissionInfo),
    ContentAutoPlayAudible(PermissionInfo),
    ContentAutoPlayInaudible(PermissionInfo),
    ContentPersistentStorage(PermissionInfo),
    ContentMediaKeySystemAccess(PermissionInfo),
    ContentCrossOriginStorageAccess(PermissionInfo),

    AppCamera(PermissionInfo),
    AppAudio(PermissionInfo),
    AppLocationCoarse(PermissionInfo),
    AppLocationFine(PermissionInfo),

    Generic(PermissionInfo),
}

/// Engine specific identifier and human readable description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PermissionInfo {
    pub id: Option<String>,
    pub desc: Option<String>,
}

impl PermissionInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            desc: None,
        }
    }
}

impl Permission {
    pub fn info(&self) -> &PermissionInfo {
        match self {
            Permission::ContentAudioCapture(info)
            | Permission::ContentAudioMicrophone(info)
            | Permission::ContentAudioOther(info)
            | Permission::ContentGeoLocation(info)
            | Permission::ContentNotification(info)
            | Permission::ContentProtectedMediaId(info)
            | Permission::ContentVideoCamera(info)
            | Permission::ContentVideoCapture(info)
            | Permission::ContentVideoScreen(info)
            | Permission::ContentVideoOther(info)
            | Permission::ContentAutoPlayAudible(info)
            | Permission::ContentAutoPlayInaudible(info)
            | Permission::ContentPersistentStorage(info)
            | Permission::ContentMediaKeySystemAccess(info)
            | Permission::ContentCrossOriginStorageAccess(info)
            | Permission::AppCamera(info)
            | Permission::AppAudio(info)
            | Permission::AppLocationCoarse(info)
            | Permission::AppLocationFine(info)
            | Permission::Generic(info) => info,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.info().id.as_deref()
    }

    pub fn desc(&self) -> Option<&str> {
        self.info().desc.as_deref()
    }

    pub fn is_audio_source(&self) -> bool {
        matches!(
            self,
            Permission::ContentAudioCapture(_)
                | Permission::ContentAudioMicrophone(_)
                | Permission::ContentAudioOther(_)
        )
    }

    pub fn is_video_source(&self) -> bool {
        matches!(
            self,
            Permission::ContentVideoCamera(_)
                | Permission::ContentVideoCapture(_)
                | Permission::ContentVideoScreen(_)
                | Permission::ContentVideoOther(_)
        )
    }
}

/// A pending permission request. The engine binding decides what granting
/// and rejecting actually do.
pub trait PermissionRequest: Send + Sync {
    /// Origin that asked for the permissions.
    fn uri(&self) -> Option<&str>;

    fn id(&self) -> &str;

    fn permissions(&self) -> &[Permission];

    fn grant(&self, permissions: &[Permission]);

    fn grant_all(&self) {
        self.grant(self.permissions());
    }

    /// Grants every requested permission if `predicate` holds for any of them.
    fn grant_if(&self, predicate: &dyn Fn(&Permission) -> bool) -> bool {
        if self.permissions().iter().any(predicate) {
            self.grant_all();
            true
        } else {
            false
        }
    }

    fn reject(&self);

    fn contains_video_and_audio_sources(&self) -> bool {
        false
    }
}

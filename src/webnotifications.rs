use serde::{Deserialize, Serialize};

/// A notification created by a page through the Notifications API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebNotification {
    pub title: Option<String>,
    /// Identifies the notification for replacement and closing.
    pub tag: String,
    pub body: Option<String>,
    pub source_url: Option<String>,
    pub icon_url: Option<String>,
    pub direction: Option<String>,
    pub lang: Option<String>,
    pub require_interaction: bool,
    pub silent: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub trigger_by_web_extension: bool,
}

impl WebNotification {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            title: None,
            tag: tag.into(),
            body: None,
            source_url: None,
            icon_url: None,
            direction: None,
            lang: None,
            require_interaction: false,
            silent: false,
            timestamp: 0,
            trigger_by_web_extension: false,
        }
    }
}

#[allow(unused_variables)]
pub trait WebNotificationDelegate: Send + Sync {
    fn on_show_notification(&self, web_notification: &WebNotification) {}

    fn on_close_notification(&self, web_notification: &WebNotification) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullWebNotificationDelegate;

impl WebNotificationDelegate for NullWebNotificationDelegate {}

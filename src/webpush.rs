use serde::{Deserialize, Serialize};

/// A push subscription of a service worker scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebPushSubscription {
    pub scope: String,
    pub endpoint: String,
    /// Application server key the subscription was created with.
    pub app_server_key: Option<Vec<u8>>,
    /// P-256 public key of the subscription.
    pub public_key: Vec<u8>,
    pub auth_secret: Vec<u8>,
}

pub type SubscriptionCallback = Box<dyn FnOnce(Option<WebPushSubscription>) + Send>;
pub type UnsubscribeCallback = Box<dyn FnOnce(bool) + Send>;

/// Push subscription management requested by the engine. The default
/// implementations never invoke the callback.
#[allow(unused_variables)]
pub trait WebPushDelegate: Send + Sync {
    fn on_get_subscription(&self, scope: &str, on_subscription: SubscriptionCallback) {}

    fn on_subscribe(&self, scope: &str, server_key: Option<&[u8]>, on_subscribe: SubscriptionCallback) {}

    /// `on_unsubscribe` receives whether the subscription was removed.
    fn on_unsubscribe(&self, scope: &str, on_unsubscribe: UnsubscribeCallback) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullWebPushDelegate;

impl WebPushDelegate for NullWebPushDelegate {}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitType {
    Link,
    Reload,
    Typed,
    Bookmark,
    Embed,
    RedirectPermanent,
    RedirectTemporary,
    Download,
    FramedLink,
}

/// Whether the visited page itself redirected elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RedirectSource {
    #[default]
    NotASource,
    Permanent,
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageVisit {
    pub visit_type: VisitType,
    pub redirect_source: RedirectSource,
}

impl PageVisit {
    pub fn new(visit_type: VisitType) -> Self {
        Self {
            visit_type,
            redirect_source: RedirectSource::NotASource,
        }
    }
}

/// Storage the engine reports visits to and queries visited state from.
#[async_trait]
pub trait HistoryTrackingDelegate: Send + Sync {
    /// A visit the engine considers worth recording happened.
    async fn on_visited(&self, uri: &str, visit: PageVisit);

    async fn on_title_changed(&self, uri: &str, title: &str);

    async fn on_preview_image_change(&self, uri: &str, preview_image_url: &str);

    /// Visited flag for each of `uris`, in the same order.
    async fn get_visited_for(&self, uris: &[String]) -> Vec<bool>;

    async fn get_visited(&self) -> Vec<String>;

    /// Lets the engine skip the async calls for uris that would be dropped.
    fn should_store_uri(&self, uri: &str) -> bool;
}

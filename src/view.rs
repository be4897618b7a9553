use crate::session::EngineSession;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Receives the captured thumbnail, or `None` if capturing failed. Must not
/// hold on to the view.
pub type ThumbnailCallback = Box<dyn FnOnce(Option<RgbaImage>) + Send>;

/// A view that renders the content of an [`EngineSession`].
pub trait EngineView: Send + Sync {
    fn render(&self, session: Arc<EngineSession>);

    /// Stops rendering the current session without detaching the view, e.g.
    /// to hand the session over to another view.
    fn release(&self);

    fn on_resume(&self) {}

    fn on_pause(&self) {}

    fn on_start(&self) {}

    fn on_stop(&self) {}

    fn on_create(&self) {}

    fn on_destroy(&self) {}

    fn can_clear_selection(&self) -> bool {
        false
    }

    fn can_scroll_vertically_up(&self) -> bool {
        true
    }

    fn can_scroll_vertically_down(&self) -> bool {
        true
    }

    /// How the last touch event was handled.
    fn input_result_detail(&self) -> InputResultDetail {
        InputResultDetail::default()
    }

    /// Captures the visible part of the page.
    fn capture_thumbnail(&self, on_finish: ThumbnailCallback);

    fn clear_selection(&self) {}

    /// Height in screen pixels of the bottom area clipped by the host UI.
    fn set_vertical_clipping(&self, clipping_height: i32);

    fn set_dynamic_toolbar_max_height(&self, height: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputResult {
    /// Neither the engine nor the page handled the event.
    Unhandled = 0,
    Handled = 1,
    /// The page handled the event through its own listeners.
    HandledContent = 2,
}

impl InputResult {
    pub fn value(&self) -> i32 {
        *self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(InputResult::Unhandled),
            1 => Some(InputResult::Handled),
            2 => Some(InputResult::HandledContent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputResultDetail {
    pub input_result: InputResult,
    pub can_scroll_to_top: bool,
    pub can_scroll_to_bottom: bool,
    pub can_overscroll_top: bool,
    pub can_overscroll_bottom: bool,
}

impl InputResultDetail {
    pub fn is_touch_unhandled(&self) -> bool {
        self.input_result == InputResult::Unhandled
    }

    pub fn is_touch_handled_by_website(&self) -> bool {
        self.input_result == InputResult::HandledContent
    }
}

impl Default for InputResultDetail {
    fn default() -> Self {
        Self {
            input_result: InputResult::Unhandled,
            can_scroll_to_top: false,
            can_scroll_to_bottom: false,
            can_overscroll_top: false,
            can_overscroll_bottom: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

/// Forwards host lifecycle events to an [`EngineView`].
pub struct LifecycleObserver {
    engine_view: Arc<dyn EngineView>,
}

impl LifecycleObserver {
    pub fn new(engine_view: Arc<dyn EngineView>) -> Self {
        Self { engine_view }
    }

    pub fn engine_view(&self) -> &Arc<dyn EngineView> {
        &self.engine_view
    }

    pub fn on_event(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Create => self.engine_view.on_create(),
            LifecycleEvent::Start => self.engine_view.on_start(),
            LifecycleEvent::Resume => self.engine_view.on_resume(),
            LifecycleEvent::Pause => self.engine_view.on_pause(),
            LifecycleEvent::Stop => self.engine_view.on_stop(),
            LifecycleEvent::Destroy => self.engine_view.on_destroy(),
        }
    }
}

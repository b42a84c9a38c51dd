//! Drag-and-drop state machine and the auto-scroll helper.
//!
//! Drag gestures are confined to a single surface; the controller turns
//! abstract pointer events into [`DropAction`]s for the repository to apply.
//! The auto-scroller is the one shared mutable resource inside a surface:
//! at most one scroll interval may run at a time, and it is always cleared
//! on drag end no matter how the drag concluded.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Distance from the viewport edge (px) inside which dragging scrolls.
pub const SCROLL_ZONE_PX: i32 = 80;
/// Scroll distance per tick (px).
pub const SCROLL_STEP_PX: i32 = 10;
/// Tick period, roughly one frame at 60 fps.
pub const SCROLL_TICK: Duration = Duration::from_millis(16);

/// What is currently being dragged, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    DraggingBookmark { bookmark_id: String },
    DraggingCategory { category_id: String },
}

/// The mutation a completed drop asks for. The repository resolves no-op
/// cases (same category, same position) itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    None,
    MoveBookmark {
        bookmark_id: String,
        category_id: String,
    },
    ReorderCategories {
        source_id: String,
        target_id: String,
    },
}

/// Per-surface drag gesture state machine.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// A bookmark card started dragging. Replaces any gesture in flight.
    pub fn begin_bookmark_drag(&mut self, bookmark_id: &str) {
        self.state = DragState::DraggingBookmark {
            bookmark_id: bookmark_id.to_string(),
        };
    }

    /// A category header started dragging. Replaces any gesture in flight.
    pub fn begin_category_drag(&mut self, category_id: &str) {
        self.state = DragState::DraggingCategory {
            category_id: category_id.to_string(),
        };
    }

    /// The pointer was released over a category drop zone. Always returns
    /// the machine to idle.
    pub fn drop_on_category(&mut self, target_category_id: &str) -> DropAction {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DropAction::None,
            DragState::DraggingBookmark { bookmark_id } => DropAction::MoveBookmark {
                bookmark_id,
                category_id: target_category_id.to_string(),
            },
            DragState::DraggingCategory { category_id } => {
                if category_id == target_category_id {
                    DropAction::None
                } else {
                    DropAction::ReorderCategories {
                        source_id: category_id,
                        target_id: target_category_id.to_string(),
                    }
                }
            }
        }
    }

    /// The drag ended without a drop (cancel, escape, left the window).
    pub fn end_drag(&mut self) {
        self.state = DragState::Idle;
    }
}

/// The scrollable viewport a drag gesture moves over. Implemented by the
/// host surface.
pub trait Viewport: Send + Sync {
    fn scroll_by(&self, dy: i32);
    fn height(&self) -> i32;
}

/// Scrolls the viewport while the drag pointer sits near its top or bottom
/// edge. One interval task at most; every pointer update clears the prior
/// one before deciding whether a new one is needed.
pub struct AutoScroller {
    viewport: Arc<dyn Viewport>,
    interval: Option<JoinHandle<()>>,
}

impl AutoScroller {
    pub fn new(viewport: Arc<dyn Viewport>) -> Self {
        Self {
            viewport,
            interval: None,
        }
    }

    /// Whether a scroll interval is currently running.
    pub fn is_scrolling(&self) -> bool {
        self.interval.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Feeds the current pointer position. Inside the top zone scrolls up,
    /// inside the bottom zone scrolls down, anywhere else stops scrolling.
    pub fn pointer_moved(&mut self, pointer_y: i32) {
        self.cancel();

        let height = self.viewport.height();
        let step = if pointer_y < SCROLL_ZONE_PX {
            -SCROLL_STEP_PX
        } else if pointer_y > height - SCROLL_ZONE_PX {
            SCROLL_STEP_PX
        } else {
            return;
        };

        let viewport = Arc::clone(&self.viewport);
        self.interval = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SCROLL_TICK);
            // first tick fires immediately; skip it so the gesture has to
            // dwell in the zone for one period before scrolling starts
            ticker.tick().await;
            loop {
                ticker.tick().await;
                viewport.scroll_by(step);
            }
        }));
    }

    /// Stops any running interval. Called on drag end regardless of whether
    /// the drag finished with a drop, a cancel, or an escape.
    pub fn cancel(&mut self) {
        if let Some(task) = self.interval.take() {
            task.abort();
        }
    }
}

impl Drop for AutoScroller {
    fn drop(&mut self) {
        self.cancel();
    }
}

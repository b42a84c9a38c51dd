pub mod drag;
pub mod exchange;
pub mod quick_capture;
pub mod reorder_engine;
pub mod sync_listener;
pub mod view_projection;

//! Widget components for the GUI
//!
//! ## Available Widgets
//!
//! - `FeedView` - Live transaction feed with its own WebSocket connection
//! - `show_preview` - Field-by-field view of the pending transaction

mod feed_view;
mod preview_panel;

pub use feed_view::FeedView;
pub use preview_panel::show_preview;

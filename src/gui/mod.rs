//! GUI module for the Seqfeed console
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main GuiApp struct: send button, preview and feed
//! - `async_job` - Generic async job polling for background tasks
//! - `theme` - Terminal-style theme (AppTheme)
//! - `notifications` - Bounded notification list
//! - `widgets` - Reusable UI widgets (FeedView, preview grid)
//!
//! ## Usage
//!
//! ```no_run
//! use seqfeed::config::Config;
//! use seqfeed::gui;
//!
//! let config = Config::from_env();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod async_job;
pub mod notifications;
pub mod theme;
pub mod widgets;

// Re-export main public API
pub use app::{launch, GuiApp};

pub use async_job::AsyncJob;
pub use notifications::NotificationEntry;
pub use theme::{configure_style, AppTheme};
pub use widgets::FeedView;

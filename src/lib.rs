//! Seqfeed: submit synthetic transactions to an L2 sequencer and watch its
//! live transaction feed.
//!
//! The core pieces are usable without the GUI:
//!
//! - [`transaction`] builds randomized preview transactions
//! - [`submit`] posts them to the sequencer
//! - [`controller`] tracks nonce, preview and status/error display state
//! - [`feed`] subscribes to the WebSocket feed and keeps the newest records

pub mod config;
pub mod controller;
pub mod error;
pub mod feed;
pub mod gui;
pub mod submission_log;
pub mod submit;
pub mod transaction;

pub use config::Config;
pub use controller::{SubmissionController, SubmitOutcome};
pub use error::{FeedError, SubmitError};
pub use feed::{FeedConnection, FeedEvent, FeedList, FeedRecord, FeedState, FeedSubscriber};
pub use submit::SubmissionClient;
pub use transaction::{generate_preview, RawTransaction};

//! Application shell: session context, navigation, and the per-screen
//! state containers that sit between the UI and the HTTP client.
//!
//! Every mutation follows one direction: UI event, API call, response,
//! local state update. No background workers, no queues.

pub mod app;
pub mod board;
pub mod config;
pub mod downloads;
pub mod ledger;
pub mod nav;
pub mod ratings;
pub mod session;
pub mod upload;

pub use app::AppController;
pub use config::AppConfig;

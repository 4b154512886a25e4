//! Core Module - infrastructure of the application
//!
//! - Configuration
//! - Error handling
//! - Request extractors
//! - Logging
//! - Application state

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use extract::{AppJson, AppPath, AppQuery};
pub use state::AppState;

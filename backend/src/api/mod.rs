//! HTTP API module.
//!
//! This module provides the HTTP server, API types and the log broadcaster
//! for the Mutant Mint backend.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::{init_logging, LogEntry, LogLevel, LOG_BROADCASTER};
pub use server::{router, start_server, AppState};
pub use types::{error_response, ApiError, HoldersResponse};

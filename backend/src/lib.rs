//! # Mutant Mint - serum-to-mutant claims and holder exports
//!
//! Native side of Mutant Mint: alloy adapters for the contracts, the
//! holder-export entry point, and the HTTP API. The flows themselves live
//! in `mutant_mint_core`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ ChainConfig │────▶│ ChainClient │────▶│ AlloySerum  │────▶│  MintFlow   │
//! │ (.env/env)  │     │ (alloy RPC) │     │ AlloyColl.  │     │  export     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mutant_mint::{export_holders, ChainClient, ChainConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ChainConfig::from_env().unwrap();
//!     let client = ChainClient::connect(&config);
//!     let summary = export_holders(&client, config.collection, "nfts.csv".as_ref(), config.page_size)
//!         .await
//!         .unwrap();
//!     println!("Exported {} holders", summary.holders);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Environment configuration
//! - [`chain`] - alloy contract adapters
//! - [`export`] - Holder export to CSV
//! - [`api`] - HTTP API server and log broadcaster

// Core modules
pub mod config;
pub mod error;

// Contracts
pub mod chain;

// Flows
pub mod export;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ChainError, ConfigError, ExportError, MintError, QuantityError, ServerError,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{ChainConfig, DEFAULT_REQUEST_TIMEOUT};

// =============================================================================
// Re-exports - Chain adapters
// =============================================================================

pub use chain::{AlloyCollection, AlloySerum, ChainClient};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{export_holders, snapshot_holders, ExportSummary};

// =============================================================================
// Re-exports - Core
// =============================================================================

pub use mutant_mint_core::{
    HolderAggregate, MintFlow, MintOutcome, Notice, Quantity, TxReceipt,
};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}

//! # Mutant Mint core
//!
//! Contract-facing logic shared by the CLI/server and the browser page.
//!
//! ```text
//! ┌──────────────┐   approve    ┌──────────────┐
//! │  SerumToken  │◀─────────────│   MintFlow   │──── claim ───▶ ClaimableCollection
//! └──────────────┘   balance    └──────────────┘
//!
//! ┌──────────────┐   pages      ┌──────────────────┐   CSV   ┌───────────┐
//! │ HolderSource │─────────────▶│ HolderAggregate  │────────▶│ nfts.csv  │
//! └──────────────┘              └──────────────────┘         └───────────┘
//! ```
//!
//! Nothing here talks to a chain directly: each client implements the
//! traits in [`contracts`] on top of its own transport.
//!
//! ## Modules
//!
//! - [`abi`] - Solidity interfaces (`ISerum`, `IMutantCollection`)
//! - [`contracts`] - Typed contract capabilities
//! - [`mint`] - Approve-then-claim flow with in-flight guard
//! - [`holders`] - Holder aggregation and CSV dialect
//! - [`models`] - Quantity, NftRecord, TxReceipt
//! - [`error`] - Error types
//! - [`constants`] - Network defaults

pub mod abi;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod holders;
pub mod mint;
pub mod models;

// =============================================================================
// Re-exports
// =============================================================================

pub use contracts::{ClaimableCollection, ContractResolver, HolderSource, Notifier, SerumToken};

pub use error::{
    ChainError, ChainResult, ExportError, ExportResult, MintError, MintResult, QuantityError,
};

pub use holders::{collect_holders, Holder, HolderAggregate, CSV_HEADER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub use mint::{MintFlow, MintOutcome, Notice};

pub use models::{NftRecord, Quantity, TxReceipt, WalletAddress};

//! Error types shared by the mint and holder-export flows.
//!
//! - [`ChainError`] - a failed contract call or transaction, unclassified
//! - [`QuantityError`] - invalid user-supplied quantity
//! - [`MintError`] - mint flow errors
//! - [`ExportError`] - holder-export flow errors
//!
//! `From` conversions let `?` lift a [`ChainError`] into either flow error.

use alloy_primitives::Address;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Chain Errors
// =============================================================================

/// A contract call or transaction that did not succeed.
///
/// Transport failures, reverts, rejected signatures and timeouts all land
/// here. The flows never inspect the message; it is carried to the caller
/// for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{call} failed: {message}")]
pub struct ChainError {
    /// Contract method or RPC call that failed (e.g. `setApprovalForAll`).
    pub call: &'static str,
    /// Error message reported by the client.
    pub message: String,
}

impl ChainError {
    pub fn new(call: &'static str, message: impl fmt::Display) -> Self {
        Self {
            call,
            message: message.to_string(),
        }
    }

    /// A transaction that was mined with a failure status.
    pub fn reverted(call: &'static str, tx_hash: impl fmt::Display) -> Self {
        Self::new(call, format!("transaction {} reverted", tx_hash))
    }
}

// =============================================================================
// Quantity Errors
// =============================================================================

/// Errors when building a [`crate::Quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Zero tokens cannot be claimed.
    #[error("Quantity must be at least 1")]
    Zero,

    /// Input is not a positive integer.
    #[error("Invalid quantity '{0}': expected a positive integer")]
    Invalid(String),
}

// =============================================================================
// Mint Errors
// =============================================================================

/// Errors from [`crate::MintFlow::mint`].
///
/// An insufficient serum balance is not an error: it is reported as
/// [`crate::MintOutcome::InsufficientBalance`] plus a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    /// No wallet address available to act for.
    #[error("No wallet connected")]
    WalletNotConnected,

    /// Another mint is still pending on this flow.
    #[error("A mint is already in progress")]
    InFlight,

    /// A contract call or transaction failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors from the holder-export flow.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No contract is deployed at the address.
    #[error("Contract not found at {0}")]
    ContractNotFound(Address),

    /// The contract has never minted a token.
    #[error("Contract {0} has no tokens")]
    NoTokens(Address),

    /// A contract call failed while reading owners.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output file could not be written.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for single contract calls.
pub type ChainResult<T> = Result<T, ChainError>;

/// Result type for the mint flow.
pub type MintResult<T> = Result<T, MintError>;

/// Result type for the holder-export flow.
pub type ExportResult<T> = Result<T, ExportError>;

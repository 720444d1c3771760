//! Application configuration.
//!
//! Compile-time constants for the Mutant Mint page. `SERUM_ADDRESS` is
//! read from the build environment (`SERUM_ADDRESS=0x... trunk build`).

use alloy_primitives::Address;
use mutant_mint_core::constants::{DEFAULT_CHAIN_ID, DEFAULT_COLLECTION_ADDRESS, DEFAULT_SERUM_TOKEN_ID};

use crate::types::{AppError, AppResult};

/// Application name shown in the header.
pub const APP_NAME: &str = "Mutant Mint";

/// Chain the wallet must be connected to.
pub const CHAIN_ID: u64 = DEFAULT_CHAIN_ID;

/// Mutant collection the claim is sent to.
pub const COLLECTION_ADDRESS: Address = DEFAULT_COLLECTION_ADDRESS;

/// Serum contract, set at build time.
pub const SERUM_ADDRESS: Option<&str> = option_env!("SERUM_ADDRESS");

/// ERC-1155 id of the serum token.
pub const SERUM_TOKEN_ID: u64 = DEFAULT_SERUM_TOKEN_ID;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Delay between `eth_getTransactionReceipt` polls.
pub const RECEIPT_POLL_INTERVAL_MS: u32 = 2_000;

/// Polls before giving up on a receipt (10 minutes).
pub const MAX_RECEIPT_POLLS: u32 = 300;

/// The configured serum address.
pub fn serum_address() -> AppResult<Address> {
    parse_serum_address(SERUM_ADDRESS)
}

fn parse_serum_address(raw: Option<&str>) -> AppResult<Address> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("SERUM_ADDRESS was not set at build time".to_string()))?;
    raw.parse()
        .map_err(|e| AppError::Validation(format!("Invalid SERUM_ADDRESS '{}': {}", raw, e)))
}

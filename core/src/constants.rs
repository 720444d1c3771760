//! Network defaults.
//!
//! The flows themselves never read these; clients use them when no
//! configuration overrides are given.

use alloy_primitives::{address, Address};

/// Chain the contracts are deployed on (Goerli).
pub const DEFAULT_CHAIN_ID: u64 = 5;

/// Public RPC endpoint for [`DEFAULT_CHAIN_ID`].
pub const DEFAULT_RPC_URL: &str = "https://rpc.ankr.com/eth_goerli";

/// Mutant collection whose holders are exported by default.
pub const DEFAULT_COLLECTION_ADDRESS: Address = address!("3714e40A15Deffb8E43A58b018bD81C2c6AC2445");

/// ERC-1155 id of the serum token.
pub const DEFAULT_SERUM_TOKEN_ID: u64 = 0;

/// File the holder export writes to.
pub const DEFAULT_EXPORT_PATH: &str = "nfts.csv";

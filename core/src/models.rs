//! Domain models for minting and holder export.

use alloy_primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::error::QuantityError;

/// Address of the acting wallet.
pub type WalletAddress = Address;

// =============================================================================
// Quantity
// =============================================================================

/// Number of mutants to claim. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(NonZeroU64);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU64::MIN);

    pub fn new(value: u64) -> Result<Self, QuantityError> {
        NonZeroU64::new(value).map(Self).ok_or(QuantityError::Zero)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Quantity as a `uint256` call argument.
    pub fn to_u256(self) -> U256 {
        U256::from(self.get())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u64 = trimmed
            .parse()
            .map_err(|_| QuantityError::Invalid(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(q: Quantity) -> Self {
        q.get()
    }
}

// =============================================================================
// NFT Records
// =============================================================================

/// Ownership snapshot of one token id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftRecord {
    pub token_id: u64,
    /// `Address::ZERO` for burned or never-minted tokens.
    pub owner: Address,
}

impl NftRecord {
    pub fn new(token_id: u64, owner: Address) -> Self {
        Self { token_id, owner }
    }

    pub fn is_burned(&self) -> bool {
        self.owner == Address::ZERO
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// A confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

impl TxReceipt {
    pub fn new(tx_hash: TxHash, block_number: Option<u64>) -> Self {
        Self { tx_hash, block_number }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(QuantityError::Zero));
        assert_eq!("0".parse::<Quantity>(), Err(QuantityError::Zero));
    }

    #[test]
    fn test_quantity_parse() {
        assert_eq!(" 3 ".parse::<Quantity>().unwrap().get(), 3);
        assert!(matches!("abc".parse::<Quantity>(), Err(QuantityError::Invalid(_))));
        assert!(matches!("-1".parse::<Quantity>(), Err(QuantityError::Invalid(_))));
        assert!(matches!("1.5".parse::<Quantity>(), Err(QuantityError::Invalid(_))));
    }

    #[test]
    fn test_quantity_default_is_one() {
        assert_eq!(Quantity::default(), Quantity::ONE);
        assert_eq!(Quantity::ONE.to_u256(), U256::from(1));
    }

    #[test]
    fn test_quantity_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }

    #[test]
    fn test_burned_record() {
        assert!(NftRecord::new(7u64, Address::ZERO).is_burned());
        assert!(!NftRecord::new(7u64, Address::repeat_byte(0x11)).is_burned());
    }
}

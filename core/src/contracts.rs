//! Typed capabilities of the contracts the flows depend on.
//!
//! Each contract role gets its own trait with strongly typed methods.
//! Implementations live with the client that talks to the chain:
//!
//! - `mutant_mint::chain` - alloy HTTP provider with a local signer
//! - `mutant_mint_frontend::services` - injected browser wallet
//!
//! The traits use `async fn` without `Send` bounds so the browser
//! implementation (whose futures hold JS values) fits. Native callers that
//! spawn onto tokio still get `Send` futures from concrete implementations.

#![allow(async_fn_in_trait)]

use alloy_primitives::{Address, U256};
use std::ops::Range;

use crate::error::ChainResult;
use crate::mint::Notice;
use crate::models::{NftRecord, Quantity, TxReceipt};

/// Serum token: ERC-1155 approval and balance.
pub trait SerumToken {
    /// Address of the serum contract.
    fn address(&self) -> Address;

    /// Whether `operator` may transfer all of `owner`'s serum.
    async fn is_approved_for_all(&self, owner: Address, operator: Address) -> ChainResult<bool>;

    /// Submit `setApprovalForAll` from `owner` and wait for the
    /// transaction to be mined. Fails when `owner` is not the account the
    /// client signs with.
    async fn set_approval_for_all(
        &self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> ChainResult<TxReceipt>;

    /// Serum balance of `owner` for the configured token id.
    async fn balance_of(&self, owner: Address) -> ChainResult<U256>;
}

/// Collection that mints mutants in exchange for serum.
pub trait ClaimableCollection {
    /// Address of the collection contract.
    fn address(&self) -> Address;

    /// Submit `claim` from `receiver` and wait for the transaction to be
    /// mined. Fails when `receiver` is not the account the client signs
    /// with.
    async fn claim(&self, receiver: Address, quantity: Quantity) -> ChainResult<TxReceipt>;
}

/// Read-only view over a collection's token ownership.
pub trait HolderSource {
    /// Number of token ids ever minted; ids run from `0` to `count - 1`.
    async fn token_count(&self) -> ChainResult<u64>;

    /// Owners of the token ids in `ids`, in id order.
    ///
    /// Burned or unminted ids are returned with the zero address.
    async fn records(&self, ids: Range<u64>) -> ChainResult<Vec<NftRecord>>;
}

/// Looks up a contract by address.
pub trait ContractResolver {
    type Handle;

    /// `Ok(None)` when no contract is deployed at `address`.
    async fn resolve(&self, address: Address) -> ChainResult<Option<Self::Handle>>;
}

/// Receives user-visible notices.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

impl<F> Notifier for F
where
    F: Fn(&Notice),
{
    fn notify(&self, notice: &Notice) {
        self(notice)
    }
}

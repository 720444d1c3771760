//! Mutant collection adapter.

use alloy_primitives::{Address, U256};
use std::ops::Range;

use mutant_mint_core::abi::IMutantCollection;
use mutant_mint_core::{
    ChainError, ChainResult, ClaimableCollection, HolderSource, NftRecord, Quantity, TxReceipt,
    MAX_PAGE_SIZE,
};

use super::client::ChainClient;

/// Claimable ERC-721 collection.
///
/// Serves both as the claim target of the mint flow and as the
/// [`HolderSource`] of the holder export.
#[derive(Clone)]
pub struct AlloyCollection {
    client: ChainClient,
    address: Address,
}

impl AlloyCollection {
    pub fn new(client: ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    /// Owner of `token_id`; the zero address when `ownerOf` reverts.
    async fn owner_of(&self, token_id: u64) -> ChainResult<Address> {
        let call = IMutantCollection::ownerOfCall {
            tokenId: U256::from(token_id),
        };
        match self.client.try_call(self.address, &call).await {
            Ok(owner) => Ok(owner),
            Err(failure) if failure.reverted => {
                log::debug!("ownerOf({}) reverted, counting as burned", token_id);
                Ok(Address::ZERO)
            }
            Err(failure) => Err(failure.error),
        }
    }
}

impl ClaimableCollection for AlloyCollection {
    fn address(&self) -> Address {
        self.address
    }

    async fn claim(&self, receiver: Address, quantity: Quantity) -> ChainResult<TxReceipt> {
        let call = IMutantCollection::claimCall {
            receiver,
            quantity: quantity.to_u256(),
        };
        self.client.send(receiver, self.address, &call).await
    }
}

impl HolderSource for AlloyCollection {
    async fn token_count(&self) -> ChainResult<u64> {
        let call = IMutantCollection::nextTokenIdToMintCall {};
        let next = self.client.eth_call(self.address, &call).await?;
        u64::try_from(next).map_err(|_| {
            ChainError::new("nextTokenIdToMint", format!("token count {} out of range", next))
        })
    }

    async fn records(&self, ids: Range<u64>) -> ChainResult<Vec<NftRecord>> {
        let len = ids.end.saturating_sub(ids.start).min(MAX_PAGE_SIZE);
        let mut records = Vec::with_capacity(len as usize);
        for token_id in ids {
            let owner = self.owner_of(token_id).await?;
            records.push(NftRecord::new(token_id, owner));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::test_support::{mock_node, unreachable_client};
    use serde_json::json;

    #[tokio::test]
    async fn test_transport_failure_is_not_burned() {
        let collection = AlloyCollection::new(unreachable_client(), Address::repeat_byte(0x01));

        let err = collection.records(0..2).await.unwrap_err();

        assert_eq!(err.call, "ownerOf");
    }

    #[tokio::test]
    async fn test_huge_range_fails_without_allocating() {
        let collection = AlloyCollection::new(unreachable_client(), Address::repeat_byte(0x01));

        let err = collection.records(0..(1u64 << 40)).await.unwrap_err();

        assert_eq!(err.call, "ownerOf");
    }

    #[tokio::test]
    async fn test_rate_limited_owner_lookup_propagates() {
        let client = mock_node(json!({
            "code": -32005,
            "message": "daily request count exceeded, request rate limited"
        }))
        .await;
        let collection = AlloyCollection::new(client, Address::repeat_byte(0x01));

        let err = collection.records(0..3).await.unwrap_err();

        assert_eq!(err.call, "ownerOf");
        assert!(err.message.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_reverted_owner_lookup_is_burned() {
        let client = mock_node(json!({ "code": 3, "message": "execution reverted" })).await;
        let collection = AlloyCollection::new(client, Address::repeat_byte(0x01));

        let records = collection.records(0..2).await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.owner == Address::ZERO));
    }

    #[tokio::test]
    async fn test_claim_without_signer_fails() {
        let collection = AlloyCollection::new(unreachable_client(), Address::repeat_byte(0x01));

        let err = collection
            .claim(Address::repeat_byte(0x02), Quantity::ONE)
            .await
            .unwrap_err();

        assert_eq!(err.call, "claim");
    }
}

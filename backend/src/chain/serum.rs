//! Serum token adapter.

use alloy_primitives::{Address, U256};

use mutant_mint_core::abi::ISerum;
use mutant_mint_core::{ChainResult, SerumToken, TxReceipt};

use super::client::ChainClient;

/// ERC-1155 serum contract, fixed to one token id.
#[derive(Clone)]
pub struct AlloySerum {
    client: ChainClient,
    address: Address,
    token_id: U256,
}

impl AlloySerum {
    pub fn new(client: ChainClient, address: Address, token_id: U256) -> Self {
        Self {
            client,
            address,
            token_id,
        }
    }

    pub fn token_id(&self) -> U256 {
        self.token_id
    }
}

impl SerumToken for AlloySerum {
    fn address(&self) -> Address {
        self.address
    }

    async fn is_approved_for_all(&self, owner: Address, operator: Address) -> ChainResult<bool> {
        let call = ISerum::isApprovedForAllCall {
            account: owner,
            operator,
        };
        self.client.eth_call(self.address, &call).await
    }

    async fn set_approval_for_all(
        &self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> ChainResult<TxReceipt> {
        let call = ISerum::setApprovalForAllCall { operator, approved };
        self.client.send(owner, self.address, &call).await
    }

    async fn balance_of(&self, owner: Address) -> ChainResult<U256> {
        let call = ISerum::balanceOfCall {
            account: owner,
            id: self.token_id,
        };
        self.client.eth_call(self.address, &call).await
    }
}

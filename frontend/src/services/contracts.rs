//! Contract adapters over the injected wallet.
//!
//! Reads go through `eth_call`, writes through `eth_sendTransaction`
//! followed by receipt polling. A write is only sent when the wallet's
//! selected account is the one the flow is acting for.

use alloy_primitives::{Address, Bytes, TxHash, U256, U64};
use alloy_sol_types::SolCall;
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use serde_json::json;

use mutant_mint_core::abi::{method_name, IMutantCollection, ISerum};
use mutant_mint_core::{ChainError, ChainResult, ClaimableCollection, Quantity, SerumToken, TxReceipt};

use super::ethereum;
use crate::config::{MAX_RECEIPT_POLLS, RECEIPT_POLL_INTERVAL_MS};

/// Serum token, fixed to one ERC-1155 id.
#[derive(Clone, Debug)]
pub struct InjectedSerum {
    address: Address,
    token_id: U256,
}

impl InjectedSerum {
    pub fn new(address: Address, token_id: U256) -> Self {
        Self { address, token_id }
    }
}

impl SerumToken for InjectedSerum {
    fn address(&self) -> Address {
        self.address
    }

    async fn is_approved_for_all(&self, owner: Address, operator: Address) -> ChainResult<bool> {
        eth_call(self.address, &ISerum::isApprovedForAllCall { account: owner, operator }).await
    }

    async fn set_approval_for_all(
        &self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> ChainResult<TxReceipt> {
        send(owner, self.address, &ISerum::setApprovalForAllCall { operator, approved }).await
    }

    async fn balance_of(&self, owner: Address) -> ChainResult<U256> {
        eth_call(
            self.address,
            &ISerum::balanceOfCall {
                account: owner,
                id: self.token_id,
            },
        )
        .await
    }
}

/// Mutant collection.
#[derive(Clone, Debug)]
pub struct InjectedCollection {
    address: Address,
}

impl InjectedCollection {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl ClaimableCollection for InjectedCollection {
    fn address(&self) -> Address {
        self.address
    }

    async fn claim(&self, receiver: Address, quantity: Quantity) -> ChainResult<TxReceipt> {
        send(
            receiver,
            self.address,
            &IMutantCollection::claimCall {
                receiver,
                quantity: quantity.to_u256(),
            },
        )
        .await
    }
}

/// Receipt fields the flow needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: TxHash,
    block_number: Option<U64>,
    /// Absent on pre-Byzantium chains
    status: Option<U64>,
}

async fn eth_call<C: SolCall>(to: Address, call: &C) -> ChainResult<C::Return> {
    let name = method_name::<C>();
    let data: Bytes = ethereum::request(
        "eth_call",
        json!([{ "to": to, "data": Bytes::from(call.abi_encode()) }, "latest"]),
    )
    .await
    .map_err(|e| ChainError::new(name, e))?;

    C::abi_decode_returns(&data).map_err(|e| ChainError::new(name, e))
}

async fn send<C: SolCall>(from: Address, to: Address, call: &C) -> ChainResult<TxReceipt> {
    let name = method_name::<C>();

    let accounts: Vec<Address> = ethereum::request("eth_accounts", json!([]))
        .await
        .map_err(|e| ChainError::new(name, e))?;
    ensure_sender(name, from, accounts.first().copied())?;

    let tx_hash: TxHash = ethereum::request(
        "eth_sendTransaction",
        json!([{ "from": from, "to": to, "data": Bytes::from(call.abi_encode()) }]),
    )
    .await
    .map_err(|e| ChainError::new(name, e))?;

    log::info!("📤 {} sent: {}", name, tx_hash);
    wait_for_receipt(name, tx_hash).await
}

async fn wait_for_receipt(name: &'static str, tx_hash: TxHash) -> ChainResult<TxReceipt> {
    for _ in 0..MAX_RECEIPT_POLLS {
        let receipt: Option<RpcReceipt> =
            ethereum::request("eth_getTransactionReceipt", json!([tx_hash]))
                .await
                .map_err(|e| ChainError::new(name, e))?;

        if let Some(receipt) = receipt {
            return confirmed(name, receipt);
        }
        TimeoutFuture::new(RECEIPT_POLL_INTERVAL_MS).await;
    }

    Err(ChainError::new(
        name,
        format!("no receipt for {} after {} polls", tx_hash, MAX_RECEIPT_POLLS),
    ))
}

/// The wallet must still have `expected` selected.
fn ensure_sender(name: &'static str, expected: Address, selected: Option<Address>) -> ChainResult<()> {
    match selected {
        Some(selected) if selected == expected => Ok(()),
        Some(selected) => Err(ChainError::new(
            name,
            format!("wallet switched to {}, expected {}", selected, expected),
        )),
        None => Err(ChainError::new(name, "wallet has no connected account")),
    }
}

fn confirmed(name: &'static str, receipt: RpcReceipt) -> ChainResult<TxReceipt> {
    if receipt.status == Some(U64::ZERO) {
        return Err(ChainError::reverted(name, receipt.transaction_hash));
    }
    Ok(TxReceipt::new(
        receipt.transaction_hash,
        receipt.block_number.map(|n| n.to::<u64>()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(status: &str) -> RpcReceipt {
        serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x1b4",
            "status": status,
            "gasUsed": "0x5208",
        }))
        .unwrap()
    }

    #[test]
    fn test_successful_receipt() {
        let receipt = confirmed("claim", receipt("0x1")).unwrap();
        assert_eq!(receipt.tx_hash, TxHash::repeat_byte(0xab));
        assert_eq!(receipt.block_number, Some(436));
    }

    #[test]
    fn test_reverted_receipt() {
        let err = confirmed("claim", receipt("0x0")).unwrap_err();
        assert_eq!(err.call, "claim");
        assert!(err.message.contains("reverted"));
    }

    #[test]
    fn test_sender_must_be_selected_account() {
        let wallet = Address::repeat_byte(0xaa);
        let other = Address::repeat_byte(0xbb);

        assert!(ensure_sender("claim", wallet, Some(wallet)).is_ok());

        let err = ensure_sender("claim", wallet, Some(other)).unwrap_err();
        assert_eq!(err.call, "claim");
        assert!(err.message.contains(&other.to_string()));

        let err = ensure_sender("setApprovalForAll", wallet, None).unwrap_err();
        assert!(err.message.contains("no connected account"));
    }
}

//! Shared alloy HTTP client.

use alloy_network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use alloy_transport::TransportError;
use std::future::{Future, IntoFuture};
use std::time::Duration;

use mutant_mint_core::abi::method_name;
use mutant_mint_core::{ChainError, ChainResult, ContractResolver, TxReceipt};

use super::collection::AlloyCollection;
use crate::config::ChainConfig;

/// Receipts take several blocks; allow this many request timeouts.
const RECEIPT_TIMEOUT_FACTOR: u32 = 10;

/// Provider plus the settings every contract adapter shares.
///
/// Cheap to clone: the provider is reference counted.
#[derive(Clone)]
pub struct ChainClient {
    provider: DynProvider,
    signer: Option<Address>,
    timeout: Duration,
}

/// A failed `eth_call`.
#[derive(Debug)]
pub(crate) struct CallFailure {
    /// The node answered with an error (execution reverted) rather than
    /// the request failing in transit.
    pub reverted: bool,
    pub error: ChainError,
}

impl ChainClient {
    /// Build an HTTP provider for `config`, with the local signer attached
    /// when one is configured.
    pub fn connect(config: &ChainConfig) -> Self {
        let url = config.rpc_url.clone();
        let provider = match &config.signer {
            Some(signer) => ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer.clone()))
                .connect_http(url)
                .erased(),
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        Self {
            provider,
            signer: config.signer_address(),
            timeout: config.request_timeout,
        }
    }

    /// Address transactions are sent from.
    pub fn signer(&self) -> Option<Address> {
        self.signer
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    async fn timed<F, T>(&self, call: &'static str, limit: Duration, fut: F) -> ChainResult<T>
    where
        F: IntoFuture<Output = Result<T, TransportError>>,
    {
        bounded(call, limit, fut.into_future())
            .await?
            .map_err(|e| ChainError::new(call, e))
    }

    /// Read-only contract call, keeping revert and transport failures apart.
    pub(crate) async fn try_call<C: SolCall>(
        &self,
        to: Address,
        call: &C,
    ) -> Result<C::Return, CallFailure> {
        let name = method_name::<C>();
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(call.abi_encode());

        let data = match bounded(name, self.timeout, self.provider.call(tx).into_future()).await {
            Ok(Ok(data)) => data,
            Ok(Err(err)) => {
                return Err(CallFailure {
                    reverted: is_revert(&err),
                    error: ChainError::new(name, err),
                })
            }
            Err(timeout) => {
                return Err(CallFailure {
                    reverted: false,
                    error: timeout,
                })
            }
        };

        C::abi_decode_returns(&data).map_err(|e| CallFailure {
            reverted: false,
            error: ChainError::new(name, e),
        })
    }

    /// Read-only contract call.
    pub(crate) async fn eth_call<C: SolCall>(&self, to: Address, call: &C) -> ChainResult<C::Return> {
        self.try_call(to, call).await.map_err(|f| f.error)
    }

    /// Sign and send a contract call from `from`, then wait for it to be
    /// mined.
    pub(crate) async fn send<C: SolCall>(
        &self,
        from: Address,
        to: Address,
        call: &C,
    ) -> ChainResult<TxReceipt> {
        let name = method_name::<C>();
        let signer = self
            .signer
            .ok_or_else(|| ChainError::new(name, "no signer configured (set WALLET_PRIVATE_KEY)"))?;
        if signer != from {
            return Err(ChainError::new(
                name,
                format!("signer is {}, cannot send from {}", signer, from),
            ));
        }

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(call.abi_encode());

        let pending = self
            .timed(name, self.timeout, self.provider.send_transaction(tx))
            .await?;
        log::info!("📤 {} sent: {}", name, pending.tx_hash());

        let receipt = bounded(name, self.timeout * RECEIPT_TIMEOUT_FACTOR, pending.get_receipt())
            .await?
            .map_err(|e| ChainError::new(name, e))?;

        let tx_hash = receipt.transaction_hash();
        if !receipt.status() {
            return Err(ChainError::reverted(name, tx_hash));
        }
        Ok(TxReceipt::new(tx_hash, receipt.block_number()))
    }

    /// Runtime bytecode at `address`; empty for accounts without code.
    pub(crate) async fn code_at(&self, address: Address) -> ChainResult<alloy_primitives::Bytes> {
        self.timed("eth_getCode", self.timeout, self.provider.get_code_at(address))
            .await
    }
}

impl ContractResolver for ChainClient {
    type Handle = AlloyCollection;

    async fn resolve(&self, address: Address) -> ChainResult<Option<AlloyCollection>> {
        let code = self.code_at(address).await?;
        if code.is_empty() {
            log::debug!("No bytecode at {}", address);
            return Ok(None);
        }
        Ok(Some(AlloyCollection::new(self.clone(), address)))
    }
}

async fn bounded<F: Future>(call: &'static str, limit: Duration, fut: F) -> ChainResult<F::Output> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| ChainError::new(call, format!("timed out after {}s", limit.as_secs())))
}

/// JSON-RPC code nodes use for `execution reverted`.
const REVERT_CODE: i64 = 3;

/// Whether the node rejected the call because the EVM reverted.
///
/// Rate limits, auth errors and other node-side failures are error
/// responses too, but say nothing about the token.
fn is_revert(err: &TransportError) -> bool {
    err.as_error_resp().is_some_and(|payload| {
        payload.code == REVERT_CODE
            || payload.message.to_lowercase().contains("execution reverted")
            || payload.as_revert_data().is_some()
    })
}

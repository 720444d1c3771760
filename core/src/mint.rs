//! Approve-then-claim mint flow.
//!
//! ```text
//! isApprovedForAll(wallet, collection)
//!        │ false                       │ true
//!        ▼                             │
//! setApprovalForAll(collection, true)  │
//!        │ (await receipt)             │
//!        ▼◀────────────────────────────┘
//! balanceOf(wallet) >= quantity ? ──no──▶ notice, stop
//!        │ yes
//!        ▼
//! claim(wallet, quantity)
//! ```
//!
//! Every step is awaited before the next one starts. Nothing is retried:
//! the first failing call aborts the flow and its error reaches the caller.

use alloy_primitives::U256;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::contracts::{ClaimableCollection, Notifier, SerumToken};
use crate::error::{MintError, MintResult};
use crate::models::{Quantity, TxReceipt, WalletAddress};

/// User-visible, non-fatal message raised by the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    /// The wallet holds less serum than the requested quantity.
    InsufficientBalance { balance: U256, requested: Quantity },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InsufficientBalance { balance, requested } => write!(
                f,
                "Insufficient serum balance: you hold {}, minting {} requires {}",
                balance, requested, requested
            ),
        }
    }
}

/// How a mint attempt ended, when no call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MintOutcome {
    /// The claim transaction was mined.
    Claimed {
        /// Present when approval had to be granted first.
        approval: Option<TxReceipt>,
        claim: TxReceipt,
    },
    /// Balance check failed; `claim` was not sent.
    InsufficientBalance { balance: U256, requested: Quantity },
}

/// Mint flow bound to one serum contract and one collection.
///
/// Holds an in-flight flag: while a [`MintFlow::mint`] call is pending,
/// further calls fail with [`MintError::InFlight`] without touching the
/// chain. Duplicate submissions (double clicks, repeated commands) are
/// rejected here rather than by whatever UI sits on top.
pub struct MintFlow<S, C, N> {
    serum: S,
    collection: C,
    notifier: N,
    in_flight: AtomicBool,
}

impl<S, C, N> MintFlow<S, C, N>
where
    S: SerumToken,
    C: ClaimableCollection,
    N: Notifier,
{
    pub fn new(serum: S, collection: C, notifier: N) -> Self {
        Self {
            serum,
            collection,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn serum(&self) -> &S {
        &self.serum
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Whether a mint is currently pending.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run the flow for `wallet`, claiming `quantity` mutants.
    pub async fn mint(
        &self,
        wallet: Option<WalletAddress>,
        quantity: Quantity,
    ) -> MintResult<MintOutcome> {
        let wallet = wallet.ok_or(MintError::WalletNotConnected)?;
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(MintError::InFlight)?;

        let operator = self.collection.address();

        // 1. Approval of the collection over the wallet's serum
        let approved = self.serum.is_approved_for_all(wallet, operator).await?;
        log::info!("🔐 Serum approval for {}: {}", operator, approved);

        // 2. Grant it if missing
        let approval = if approved {
            None
        } else {
            log::info!("📝 Approving {} to burn serum...", operator);
            let receipt = self.serum.set_approval_for_all(wallet, operator, true).await?;
            log::info!("✅ Approval confirmed: {}", receipt.tx_hash);
            Some(receipt)
        };

        // 3. Balance guard
        let balance = self.serum.balance_of(wallet).await?;
        log::info!("💰 Serum balance of {}: {}", wallet, balance);

        if balance < quantity.to_u256() {
            let notice = Notice::InsufficientBalance {
                balance,
                requested: quantity,
            };
            log::warn!("{}", notice);
            self.notifier.notify(&notice);
            return Ok(MintOutcome::InsufficientBalance {
                balance,
                requested: quantity,
            });
        }

        // 4. Claim
        log::info!("🧪 Claiming {} mutant(s) for {}...", quantity, wallet);
        let claim = self.collection.claim(wallet, quantity).await?;
        log::info!("✅ Claim confirmed: {}", claim.tx_hash);

        Ok(MintOutcome::Claimed { approval, claim })
    }
}

/// Holds the in-flight flag; clears it on drop, including when the mint
/// future is dropped mid-way.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

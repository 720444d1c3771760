//! Mint panel: quantity input and the mint button.

use alloy_primitives::Address;
use leptos::*;
use std::rc::Rc;

use mutant_mint_core::{MintFlow, MintOutcome, Notice, Notifier, Quantity};

use super::logs::push_log;
use crate::services::contracts::{InjectedCollection, InjectedSerum};
use crate::services::wallet::InjectedWallet;
use crate::{AppError, LogEntry};

/// Mint flow driven by the page.
pub type PageMintFlow = MintFlow<InjectedSerum, InjectedCollection, AlertNotifier>;

/// Shows notices with `window.alert` and in the activity panel.
#[derive(Clone, Copy)]
pub struct AlertNotifier {
    set_logs: WriteSignal<Vec<LogEntry>>,
}

impl AlertNotifier {
    pub fn new(set_logs: WriteSignal<Vec<LogEntry>>) -> Self {
        Self { set_logs }
    }
}

impl Notifier for AlertNotifier {
    fn notify(&self, notice: &Notice) {
        let message = notice.to_string();
        push_log(self.set_logs, LogEntry::warning(message.clone()));
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&message);
        }
    }
}

#[component]
pub fn MintPanel(
    flow: Rc<PageMintFlow>,
    wallet_address: ReadSignal<Option<Address>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let (quantity_input, set_quantity_input) = create_signal("1".to_string());
    let (minting, set_minting) = create_signal(false);
    let flow = store_value(flow);

    let on_mint = move |_| {
        if minting.get_untracked() {
            return;
        }
        let quantity = match quantity_input.get_untracked().parse::<Quantity>() {
            Ok(quantity) => quantity,
            Err(e) => {
                push_log(set_logs, LogEntry::error(AppError::from(e).to_string()));
                return;
            }
        };
        let wallet = wallet_address.get_untracked();
        let flow = flow.get_value();

        set_minting.set(true);
        spawn_local(async move {
            if let Err(e) = InjectedWallet::require_chain().await {
                push_log(set_logs, LogEntry::error(e.to_string()));
                set_minting.set(false);
                return;
            }
            push_log(set_logs, LogEntry::info(format!("🧬 Minting {} mutant(s)...", quantity)));

            match flow.mint(wallet, quantity).await {
                Ok(MintOutcome::Claimed { approval, claim }) => {
                    if let Some(approval) = approval {
                        push_log(set_logs, LogEntry::success(format!("Serum approved: {}", approval.tx_hash)));
                    }
                    push_log(set_logs, LogEntry::success(format!("Mutant claimed: {}", claim.tx_hash)));
                }
                // Reported by the notifier
                Ok(MintOutcome::InsufficientBalance { .. }) => {}
                Err(e) => push_log(set_logs, LogEntry::error(AppError::from(e).to_string())),
            }

            set_minting.set(false);
        });
    };

    view! {
        <div class="mint-panel">
            <p class="wallet-address">
                {move || wallet_address.get().map(|a| a.to_string()).unwrap_or_default()}
            </p>
            <label class="quantity">
                "Quantity"
                <input
                    type="number"
                    min="1"
                    step="1"
                    prop:value=quantity_input
                    on:input=move |ev| set_quantity_input.set(event_target_value(&ev))
                />
            </label>
            <button
                class="mint-button"
                disabled=move || minting.get() || wallet_address.get().is_none()
                on:click=on_mint
            >
                {move || if minting.get() { "Minting..." } else { "Mint Your Mutant NFT" }}
            </button>
        </div>
    }
}

use alloy_primitives::Address;
use leptos::*;

use super::logs::push_log;
use crate::services::wallet::InjectedWallet;
use crate::{LogEntry, APP_NAME, CHAIN_ID};

/// `0xf39F...2266`
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

#[component]
pub fn Header(
    wallet_address: ReadSignal<Option<Address>>,
    set_wallet_address: WriteSignal<Option<Address>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let on_wallet_click = move |_| {
        if wallet_address.get_untracked().is_some() {
            return;
        }
        spawn_local(async move {
            match InjectedWallet::connect().await {
                Ok(address) => {
                    set_wallet_address.set(Some(address));
                    push_log(set_logs, LogEntry::success(format!("Wallet connected: {}", address)));

                    match InjectedWallet::chain_id().await {
                        Ok(id) if id != CHAIN_ID => push_log(
                            set_logs,
                            LogEntry::warning(format!(
                                "Wallet is on chain {}, the mutant collection lives on chain {}",
                                id, CHAIN_ID
                            )),
                        ),
                        Ok(_) => {}
                        Err(e) => log::warn!("Could not read chain id: {}", e),
                    }
                }
                Err(e) => {
                    log::error!("❌ Wallet connection failed: {}", e);
                    push_log(set_logs, LogEntry::error(e.to_string()));
                }
            }
        });
    };

    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">{APP_NAME}</a>
            </div>
            <div class="header-right">
                <div
                    class="wallet-status"
                    class:connected=move || wallet_address.get().is_some()
                    on:click=on_wallet_click
                    style="cursor: pointer;"
                >
                    <span class="wallet-dot" class:connected=move || wallet_address.get().is_some()></span>
                    <span id="walletText">
                        {move || match wallet_address.get() {
                            Some(addr) => short_address(&addr),
                            None => "Connect Wallet".to_string(),
                        }}
                    </span>
                </div>
            </div>
        </header>
    }
}

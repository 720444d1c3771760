//! Mutant Mint - Frontend Rust/Leptos Application
//!
//! A WebAssembly page that claims mutants by burning serum, signed by the
//! injected Ethereum wallet.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (wallet connection)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MintPanel (quantity, mint button) ──▶ MintFlow              │
//! │  LogsPanel (activity)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (LogEntry, AppError)
//! - [`components`] - UI components (Header, MintPanel, LogsPanel)
//! - [`services`] - Wallet and contract adapters

use alloy_primitives::{Address, U256};
use leptos::*;
use std::rc::Rc;

use mutant_mint_core::MintFlow;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{AppError, AppResult, LogEntry, LogLevel};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

/// Build the page's mint flow, or explain why it cannot be built.
fn build_flow(set_logs: WriteSignal<Vec<LogEntry>>) -> AppResult<Rc<PageMintFlow>> {
    let serum = InjectedSerum::new(serum_address()?, U256::from(SERUM_TOKEN_ID));
    let collection = InjectedCollection::new(COLLECTION_ADDRESS);
    Ok(Rc::new(MintFlow::new(serum, collection, AlertNotifier::new(set_logs))))
}

#[component]
pub fn App() -> impl IntoView {
    let (wallet_address, set_wallet_address) = create_signal(None::<Address>);
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Pick up an account the site is already authorized for
    spawn_local(async move {
        match InjectedWallet::current_address().await {
            Ok(Some(address)) => set_wallet_address.set(Some(address)),
            Ok(None) => {}
            Err(e) => log::warn!("Could not read wallet accounts: {}", e),
        }
    });

    // Follow account switches so the flow always acts for the selected account
    InjectedWallet::watch_accounts(move |account| {
        match account {
            Some(address) => log::info!("🔄 Wallet account changed: {}", address),
            None => log::info!("🔌 Wallet disconnected"),
        }
        set_wallet_address.set(account);
    });

    let mint_section = match build_flow(set_logs) {
        Ok(flow) => view! {
            <MintPanel flow=flow wallet_address=wallet_address set_logs=set_logs/>
        }
        .into_view(),
        Err(e) => {
            log::error!("❌ {}", e);
            view! { <div class="config-error">{e.to_string()}</div> }.into_view()
        }
    };

    view! {
        <Header
            wallet_address=wallet_address
            set_wallet_address=set_wallet_address
            set_logs=set_logs
        />

        <main class="container">
            <div class="hero">
                <h1>"Mint Your Mutant"</h1>
                <p class="subtitle">"Burn serum to claim a mutant from the collection."</p>
            </div>

            {mint_section}

            <Show when=move || !logs.get().is_empty() fallback=|| view! {}>
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>
        </main>

        <Footer/>
    }
}

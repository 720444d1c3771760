//! Injected Ethereum wallet (MetaMask and other EIP-1193 extensions).

use alloy_primitives::{Address, U64};
use serde_json::json;

use super::ethereum;
use crate::config::CHAIN_ID;
use crate::types::{AppError, AppResult};

/// Accessor for the wallet injected as `window.ethereum`.
pub struct InjectedWallet;

impl InjectedWallet {
    /// Whether a compatible extension is installed.
    pub fn is_available() -> bool {
        let available = ethereum::has_provider();
        if !available {
            log::warn!("⚠️  No Ethereum wallet found");
        }
        available
    }

    /// Ask the wallet for access and return the selected account.
    pub async fn connect() -> AppResult<Address> {
        if !Self::is_available() {
            return Err(AppError::Wallet(
                "No Ethereum wallet found. Please install MetaMask or a compatible extension.".to_string(),
            ));
        }

        log::info!("🔌 Connecting to wallet...");
        let accounts: Vec<Address> = ethereum::request("eth_requestAccounts", json!([]))
            .await
            .map_err(AppError::Wallet)?;

        let address = first_account(accounts)?;
        log::info!("✅ Connected to wallet: {}", address);
        Ok(address)
    }

    /// Account currently exposed to the page, if any.
    pub async fn current_address() -> AppResult<Option<Address>> {
        if !ethereum::has_provider() {
            return Ok(None);
        }
        let accounts: Vec<Address> = ethereum::request("eth_accounts", json!([]))
            .await
            .map_err(AppError::Wallet)?;
        Ok(accounts.into_iter().next())
    }

    /// Chain the wallet is connected to.
    pub async fn chain_id() -> AppResult<u64> {
        let id: U64 = ethereum::request("eth_chainId", json!([]))
            .await
            .map_err(AppError::Wallet)?;
        Ok(id.to::<u64>())
    }

    /// Fail unless the wallet is on [`CHAIN_ID`].
    pub async fn require_chain() -> AppResult<()> {
        ensure_chain(Self::chain_id().await?)
    }

    /// Call `handler` with the newly selected account (or `None` once the
    /// wallet disconnects) whenever the user switches accounts.
    pub fn watch_accounts(handler: impl Fn(Option<Address>) + 'static) {
        ethereum::on_accounts_changed(move |json| match parse_accounts(&json) {
            Ok(account) => handler(account),
            Err(e) => log::warn!("Ignoring accountsChanged event: {}", e),
        });
    }
}

fn ensure_chain(chain_id: u64) -> AppResult<()> {
    if chain_id == CHAIN_ID {
        return Ok(());
    }
    Err(AppError::Wallet(format!(
        "Wallet is on chain {}, switch to chain {} to mint",
        chain_id, CHAIN_ID
    )))
}

fn parse_accounts(json: &str) -> AppResult<Option<Address>> {
    let accounts: Vec<Address> =
        serde_json::from_str(json).map_err(|e| AppError::Wallet(format!("bad account list: {}", e)))?;
    Ok(accounts.into_iter().next())
}

fn first_account(accounts: Vec<Address>) -> AppResult<Address> {
    accounts
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Wallet("Wallet returned no accounts".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_account() {
        let a = Address::repeat_byte(0xaa);
        assert_eq!(first_account(vec![a, Address::ZERO]).unwrap(), a);
        assert!(matches!(first_account(Vec::new()), Err(AppError::Wallet(_))));
    }

    #[test]
    fn test_ensure_chain() {
        assert!(ensure_chain(CHAIN_ID).is_ok());

        let err = ensure_chain(CHAIN_ID + 1).unwrap_err();
        assert!(matches!(err, AppError::Wallet(_)));
        assert!(err.to_string().contains(&format!("switch to chain {}", CHAIN_ID)));
    }

    #[test]
    fn test_parse_accounts() {
        let selected = parse_accounts(r#"["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"]"#).unwrap();
        assert_eq!(
            selected,
            Some("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap())
        );
        assert_eq!(parse_accounts("[]").unwrap(), None);
        assert!(parse_accounts("{}").is_err());
    }
}

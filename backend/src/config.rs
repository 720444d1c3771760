//! Chain configuration.
//!
//! Loaded from the environment (and `.env` via dotenvy), falling back to
//! the network defaults in `mutant_mint_core::constants`.
//!
//! | Variable               | Default                          |
//! |------------------------|----------------------------------|
//! | `RPC_URL`              | Goerli public RPC                |
//! | `CHAIN_ID`             | `5`                              |
//! | `COLLECTION_ADDRESS`   | mutant collection                |
//! | `SERUM_ADDRESS`        | none (required to mint)          |
//! | `SERUM_TOKEN_ID`       | `0`                              |
//! | `WALLET_PRIVATE_KEY`   | none (required to mint)          |
//! | `REQUEST_TIMEOUT_SECS` | `30`                             |
//! | `EXPORT_PAGE_SIZE`     | `100` (at most 1000)             |

use alloy_primitives::{Address, U256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use mutant_mint_core::constants::{
    DEFAULT_CHAIN_ID, DEFAULT_COLLECTION_ADDRESS, DEFAULT_RPC_URL, DEFAULT_SERUM_TOKEN_ID,
};
use mutant_mint_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::{ConfigError, ConfigResult};

/// Default bound on a single RPC request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for talking to the chain.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: Url,
    pub chain_id: u64,
    /// Mutant collection (claim target and default export target).
    pub collection: Address,
    pub serum: Option<Address>,
    pub serum_token_id: U256,
    /// Local signer for transactions; read-only when absent.
    pub signer: Option<PrivateKeySigner>,
    pub request_timeout: Duration,
    pub page_size: NonZeroU64,
}

impl ChainConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read each variable.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let rpc_url = match get("RPC_URL") {
            Some(raw) => parse_url(&raw)?,
            None => parse_url(DEFAULT_RPC_URL)?,
        };

        let chain_id = parse_or("CHAIN_ID", get("CHAIN_ID"), DEFAULT_CHAIN_ID)?;

        let collection = match get("COLLECTION_ADDRESS") {
            Some(raw) => parse_address("COLLECTION_ADDRESS", &raw)?,
            None => DEFAULT_COLLECTION_ADDRESS,
        };

        let serum = get("SERUM_ADDRESS")
            .map(|raw| parse_address("SERUM_ADDRESS", &raw))
            .transpose()?;

        let serum_token_id = match get("SERUM_TOKEN_ID") {
            Some(raw) => U256::from_str(&raw)
                .map_err(|e| ConfigError::invalid("SERUM_TOKEN_ID", raw.as_str(), e))?,
            None => U256::from(DEFAULT_SERUM_TOKEN_ID),
        };

        let signer = get("WALLET_PRIVATE_KEY")
            .map(|raw| parse_signer(&raw, chain_id))
            .transpose()?;

        let timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            get("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?;

        let page_size = match get("EXPORT_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            rpc_url,
            chain_id,
            collection,
            serum,
            serum_token_id,
            signer,
            request_timeout: Duration::from_secs(timeout_secs),
            page_size,
        })
    }

    /// Address of the configured signer.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }

    /// Serum contract address, required for minting.
    pub fn require_serum(&self) -> ConfigResult<Address> {
        self.serum.ok_or(ConfigError::Missing("SERUM_ADDRESS"))
    }
}

fn parse_url(raw: &str) -> ConfigResult<Url> {
    Url::parse(raw).map_err(|e| ConfigError::invalid("RPC_URL", raw, e))
}

pub(crate) fn parse_address(key: &'static str, raw: &str) -> ConfigResult<Address> {
    Address::from_str(raw).map_err(|e| ConfigError::invalid(key, raw, e))
}

pub(crate) fn parse_page_size(raw: &str) -> ConfigResult<NonZeroU64> {
    let n = raw
        .parse::<u64>()
        .map_err(|e| ConfigError::invalid("EXPORT_PAGE_SIZE", raw, e))?;
    bounded_page_size(n).ok_or_else(|| {
        ConfigError::invalid(
            "EXPORT_PAGE_SIZE",
            raw,
            format!("must be between 1 and {}", MAX_PAGE_SIZE),
        )
    })
}

/// `n` as a page size, if within `1..=MAX_PAGE_SIZE`.
pub(crate) fn bounded_page_size(n: u64) -> Option<NonZeroU64> {
    NonZeroU64::new(n).filter(|n| n.get() <= MAX_PAGE_SIZE)
}

fn parse_or(key: &'static str, raw: Option<String>, default: u64) -> ConfigResult<u64> {
    match raw {
        Some(raw) => raw.parse().map_err(|e| ConfigError::invalid(key, raw.as_str(), e)),
        None => Ok(default),
    }
}

fn parse_signer(raw: &str, chain_id: u64) -> ConfigResult<PrivateKeySigner> {
    let key = raw.strip_prefix("0x").unwrap_or(raw);
    let signer = key
        .parse::<PrivateKeySigner>()
        // never echo the key itself
        .map_err(|e| ConfigError::invalid("WALLET_PRIVATE_KEY", "<redacted>", e))?;
    Ok(signer.with_chain_id(Some(chain_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Well-known anvil/hardhat test key #0
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn load(vars: &[(&str, &str)]) -> ConfigResult<ChainConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ChainConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.rpc_url.as_str(), DEFAULT_RPC_URL);
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.collection, DEFAULT_COLLECTION_ADDRESS);
        assert_eq!(config.serum, None);
        assert_eq!(config.serum_token_id, U256::ZERO);
        assert!(config.signer.is_none());
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("RPC_URL", "http://localhost:8545"),
            ("CHAIN_ID", "31337"),
            ("SERUM_ADDRESS", "0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            ("SERUM_TOKEN_ID", "2"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("EXPORT_PAGE_SIZE", "25"),
        ])
        .unwrap();

        assert_eq!(config.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(config.chain_id, 31337);
        assert!(config.serum.is_some());
        assert_eq!(config.serum_token_id, U256::from(2));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.page_size.get(), 25);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("CHAIN_ID", "  "), ("SERUM_ADDRESS", "")]).unwrap();
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.serum, None);
    }

    #[test]
    fn test_signer_address() {
        let config = load(&[("WALLET_PRIVATE_KEY", TEST_KEY)]).unwrap();
        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(config.signer_address(), Some(expected));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("COLLECTION_ADDRESS", "0x1234")]),
            Err(ConfigError::Invalid { key: "COLLECTION_ADDRESS", .. })
        ));
        assert!(matches!(
            load(&[("EXPORT_PAGE_SIZE", "0")]),
            Err(ConfigError::Invalid { key: "EXPORT_PAGE_SIZE", .. })
        ));
        assert!(matches!(
            load(&[("EXPORT_PAGE_SIZE", "1099511627776")]),
            Err(ConfigError::Invalid { key: "EXPORT_PAGE_SIZE", .. })
        ));
        assert!(matches!(
            load(&[("RPC_URL", "not a url")]),
            Err(ConfigError::Invalid { key: "RPC_URL", .. })
        ));
    }

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(bounded_page_size(1).map(NonZeroU64::get), Some(1));
        assert_eq!(bounded_page_size(MAX_PAGE_SIZE).map(NonZeroU64::get), Some(MAX_PAGE_SIZE));
        assert_eq!(bounded_page_size(0), None);
        assert_eq!(bounded_page_size(MAX_PAGE_SIZE + 1), None);
        assert_eq!(parse_page_size("1000").unwrap().get(), 1000);
        assert!(parse_page_size("1001").unwrap_err().to_string().contains("between 1 and 1000"));
    }

    #[test]
    fn test_bad_key_is_redacted() {
        let err = load(&[("WALLET_PRIVATE_KEY", "0xdeadbeef")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("<redacted>"));
        assert!(!msg.contains("deadbeef"));
    }

    #[test]
    fn test_require_serum() {
        let config = load(&[]).unwrap();
        assert!(matches!(
            config.require_serum(),
            Err(ConfigError::Missing("SERUM_ADDRESS"))
        ));
    }
}

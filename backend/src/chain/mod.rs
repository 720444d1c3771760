//! Native contract adapters.
//!
//! Implement the `mutant_mint_core` contract traits over an alloy HTTP
//! provider. Transactions are signed by the local key from
//! [`ChainConfig`](crate::config::ChainConfig).
//!
//! ```rust,ignore
//! let client = ChainClient::connect(&config);
//! let serum = AlloySerum::new(client.clone(), serum_address, config.serum_token_id);
//! let collection = AlloyCollection::new(client, config.collection);
//! ```

pub mod client;
pub mod collection;
pub mod serum;

pub use client::ChainClient;
pub use collection::AlloyCollection;
pub use serum::AlloySerum;

#[cfg(test)]
pub(crate) mod test_support {
    use super::ChainClient;
    use crate::config::ChainConfig;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    // Well-known anvil/hardhat test key #0
    const TEST_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn client(rpc_url: &str, key: Option<&str>) -> ChainClient {
        let config = ChainConfig::from_lookup(|name| match name {
            "RPC_URL" => Some(rpc_url.to_string()),
            "REQUEST_TIMEOUT_SECS" => Some("2".to_string()),
            "WALLET_PRIVATE_KEY" => key.map(str::to_string),
            _ => None,
        })
        .unwrap();
        ChainClient::connect(&config)
    }

    /// Client pointed at a closed local port.
    pub(crate) fn unreachable_client() -> ChainClient {
        client("http://127.0.0.1:1", None)
    }

    /// Same, with [`TEST_KEY`] as signer.
    pub(crate) fn unreachable_signing_client() -> ChainClient {
        client("http://127.0.0.1:1", Some(TEST_KEY))
    }

    /// Client for a local node that answers every request with `error`
    /// as its JSON-RPC error object.
    pub(crate) async fn mock_node(error: Value) -> ChainClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let app = Router::new().route(
            "/",
            post(move |Json(request): Json<Value>| {
                let error = error.clone();
                async move { Json(json!({ "jsonrpc": "2.0", "id": request["id"], "error": error })) }
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        client(&url, None)
    }
}

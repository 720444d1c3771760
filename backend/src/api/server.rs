//! HTTP Server for the Mutant Mint API.
//!
//! Read-only: minting needs the holder's own wallet and happens in the
//! browser page or through the CLI.
//!
//! # API Endpoints
//!
//! | Method | Path                          | Description                    |
//! |--------|-------------------------------|--------------------------------|
//! | GET    | `/health`                     | Health check                   |
//! | GET    | `/api/holders/{address}`      | Holder snapshot as JSON        |
//! | GET    | `/api/holders/{address}/csv`  | Holder snapshot as CSV         |
//! | GET    | `/api/logs`                   | SSE stream for real-time logs  |

use alloy_primitives::Address;
use axum::{
    extract::{Path, Query, State},
    http::{header, Method},
    response::{sse::Event, IntoResponse, Json, Sse},
    routing::get,
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, num::NonZeroU64, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use mutant_mint_core::{HolderAggregate, MAX_PAGE_SIZE};

use super::logs::LOG_BROADCASTER;
use super::types::{ApiError, HoldersQuery, HoldersResponse};
use crate::chain::ChainClient;
use crate::config::{bounded_page_size, parse_address, ChainConfig};
use crate::error::ServerResult;
use crate::export::snapshot_holders;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub client: ChainClient,
    pub chain_id: u64,
    pub collection: Address,
    pub page_size: NonZeroU64,
}

impl AppState {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            client: ChainClient::connect(config),
            chain_id: config.chain_id,
            collection: config.collection,
            page_size: config.page_size,
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    // Permissive CORS so the page can be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/holders/{address}", get(holders_json))
        .route("/api/holders/{address}/csv", get(holders_csv))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: &ChainConfig, port: u16) -> ServerResult<()> {
    let app = router(AppState::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("🚀 Mutant Mint server running on http://localhost:{}", port);
    log::info!("   GET  /api/holders/{{address}}     - Holder snapshot (JSON)");
    log::info!("   GET  /api/holders/{{address}}/csv - Holder snapshot (CSV)");
    log::info!("   GET  /api/logs                   - SSE log stream");
    log::info!("   GET  /health                     - Health check");
    log::info!("🔗 RPC {} (chain {})", config.rpc_url, config.chain_id);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mutant-mint",
        "version": env!("CARGO_PKG_VERSION"),
        "network": {
            "chainId": state.chain_id,
            "collection": state.collection,
        },
        "endpoints": {
            "holders": "GET /api/holders/{address}",
            "holdersCsv": "GET /api/holders/{address}/csv",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// Resolve the request into a holder snapshot.
async fn snapshot(
    state: &AppState,
    address: &str,
    query: &HoldersQuery,
) -> Result<(Address, HolderAggregate), ApiError> {
    let contract = parse_address("address", address)
        .map_err(|e| ApiError::bad_request("invalid_address", e.to_string()))?;

    let page_size = match query.page_size {
        Some(n) => bounded_page_size(n).ok_or_else(|| {
            ApiError::bad_request(
                "invalid_page_size",
                format!("pageSize must be between 1 and {}", MAX_PAGE_SIZE),
            )
        })?,
        None => state.page_size,
    };

    log::info!("📥 Holder snapshot requested for {}", contract);
    let aggregate = snapshot_holders(&state.client, contract, page_size)
        .await
        .map_err(|e| {
            log::error!("Holder snapshot failed: {}", e);
            ApiError::from(e)
        })?;

    Ok((contract, aggregate))
}

/// Holder snapshot as JSON
async fn holders_json(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<HoldersQuery>,
) -> Result<Json<HoldersResponse>, ApiError> {
    let (contract, aggregate) = snapshot(&state, &address, &query).await?;
    Ok(Json(HoldersResponse::new(contract, &aggregate)))
}

/// Holder snapshot in the export CSV dialect
async fn holders_csv(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<HoldersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (_, aggregate) = snapshot(&state, &address, &query).await?;
    let csv = aggregate
        .to_csv()
        .map_err(|e| ApiError::from(crate::error::ExportError::from(e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"nfts.csv\""),
        ],
        csv,
    ))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

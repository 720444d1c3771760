//! REST API types.

use alloy_primitives::Address;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use mutant_mint_core::{Holder, HolderAggregate};

use crate::error::ExportError;

/// Holder snapshot of a collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldersResponse {
    pub contract: Address,
    /// Sorted by address
    pub holders: Vec<Holder>,
    pub total_holders: usize,
    pub tokens_held: u64,
    pub burned: u64,
}

impl HoldersResponse {
    pub fn new(contract: Address, aggregate: &HolderAggregate) -> Self {
        Self {
            contract,
            holders: aggregate.holders(),
            total_holders: aggregate.len(),
            tokens_held: aggregate.total_held(),
            burned: aggregate.burned(),
        }
    }
}

/// Query parameters of the holder endpoints.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldersQuery {
    /// Token ids per `ownerOf` page
    pub page_size: Option<u64>,
}

/// Error returned by an API handler.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        let message = err.to_string();
        match err {
            ExportError::ContractNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "contract_not_found", message)
            }
            ExportError::NoTokens(_) => Self::new(StatusCode::NOT_FOUND, "no_tokens", message),
            ExportError::Chain(_) => Self::new(StatusCode::BAD_GATEWAY, "chain_error", message),
            ExportError::Csv(_) | ExportError::Io(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(error_response(self.code, &self.message))).into_response()
    }
}

/// Create an error response body
pub fn error_response(code: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutant_mint_core::{ChainError, NftRecord};

    #[test]
    fn test_export_error_status() {
        let cases = [
            (ExportError::ContractNotFound(Address::ZERO), StatusCode::NOT_FOUND, "contract_not_found"),
            (ExportError::NoTokens(Address::ZERO), StatusCode::NOT_FOUND, "no_tokens"),
            (
                ExportError::Chain(ChainError::new("ownerOf", "connection refused")),
                StatusCode::BAD_GATEWAY,
                "chain_error",
            ),
        ];

        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn test_error_body_shape() {
        let body = error_response("no_tokens", "Contract 0x00 has no tokens");
        assert_eq!(body["error"]["code"], "no_tokens");
        assert_eq!(body["error"]["message"], "Contract 0x00 has no tokens");
    }

    #[test]
    fn test_holders_response() {
        let a = Address::repeat_byte(0xaa);
        let aggregate: HolderAggregate = [
            NftRecord::new(0, a),
            NftRecord::new(1, a),
            NftRecord::new(2, Address::ZERO),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(HoldersResponse::new(Address::ZERO, &aggregate)).unwrap();

        assert_eq!(json["totalHolders"], 1);
        assert_eq!(json["tokensHeld"], 2);
        assert_eq!(json["burned"], 1);
        assert_eq!(json["holders"][0]["quantity"], 2);
    }
}

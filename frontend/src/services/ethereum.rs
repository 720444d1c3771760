//! JSON-RPC through the injected EIP-1193 provider.

use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Whether the page has an injected wallet.
pub fn has_provider() -> bool {
    has_provider_js()
}

/// Send `method` with `params` to the wallet and decode the result.
///
/// Errors are returned as the wallet's message (e.g. "User rejected the
/// request.").
pub async fn request<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, String> {
    let promise = eth_request_js(method, &params.to_string());

    let result = JsFuture::from(promise).await.map_err(|e| js_error_message(&e))?;

    let json = result
        .as_string()
        .ok_or_else(|| format!("{}: wallet returned a non-string result", method))?;

    decode_result(method, &json)
}

/// Call `handler` with the JSON account list each time the wallet's
/// selected account changes. Lives for the rest of the page.
pub fn on_accounts_changed(handler: impl Fn(String) + 'static) {
    let callback = Closure::<dyn Fn(String)>::new(handler);
    on_accounts_changed_js(&callback);
    callback.forget();
}

fn decode_result<T: DeserializeOwned>(method: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("{}: unexpected result {}: {}", method, json, e))
}

fn js_error_message(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "Unknown wallet error".to_string())
}

#[wasm_bindgen(module = "/src/js/ethereum.js")]
extern "C" {
    #[wasm_bindgen(js_name = "hasProvider")]
    fn has_provider_js() -> bool;

    #[wasm_bindgen(js_name = "ethRequest")]
    fn eth_request_js(method: &str, params_json: &str) -> js_sys::Promise;

    #[wasm_bindgen(js_name = "onAccountsChanged")]
    fn on_accounts_changed_js(callback: &Closure<dyn Fn(String)>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};

    #[test]
    fn test_decode_result() {
        let accounts: Vec<Address> =
            decode_result("eth_accounts", r#"["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"]"#).unwrap();
        assert_eq!(accounts.len(), 1);

        let data: Bytes = decode_result("eth_call", r#""0x0001""#).unwrap();
        assert_eq!(data.as_ref(), &[0x00, 0x01]);

        let none: Option<Value> = decode_result("eth_getTransactionReceipt", "null").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_decode_error_names_method() {
        let err = decode_result::<Vec<Address>>("eth_accounts", "42").unwrap_err();
        assert!(err.starts_with("eth_accounts"));
    }
}

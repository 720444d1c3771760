//! Wallet and contract services.
//!
//! # Services
//!
//! - [`ethereum`] - JSON-RPC through the injected provider
//! - [`wallet`] - Account connection
//! - [`contracts`] - Serum and collection adapters for the mint flow
//!
//! # JavaScript Bindings
//!
//! `ethereum` uses the binding in `src/js/ethereum.js`.

pub mod contracts;
pub mod ethereum;
pub mod wallet;

pub use contracts::*;
pub use wallet::*;

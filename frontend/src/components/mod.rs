//! UI Components for the Mutant Mint page.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with wallet connection
//! - [`Footer`] - Page footer with contract links
//!
//! # Feature Components
//! - [`MintPanel`] - Quantity input and mint button
//! - [`LogsPanel`] - Activity of the mint flow

mod footer;
mod header;
mod logs;
mod mint;

pub use footer::*;
pub use header::*;
pub use logs::*;
pub use mint::*;

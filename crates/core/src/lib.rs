//! Coin Ledger core: a ledger of crypto lot purchases, the edit lifecycle of
//! each row, and live valuation against a coin price feed.
//!
//! [`PortfolioStore`] is the single writer of the ledger. Rows are driven by
//! [`controller::TransactionEditController`], which turns user input into
//! [`models::intent::Intent`]s; on native targets [`runtime::StoreRuntime`]
//! delivers those intents and runs coin-data fetches in the background.

pub mod controller;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod models;
pub mod providers;
#[cfg(not(target_arch = "wasm32"))]
pub mod runtime;
pub mod services;
pub mod storage;
pub mod store;

pub use errors::CoreError;
pub use store::{Effect, PortfolioStore, SubscriptionId};

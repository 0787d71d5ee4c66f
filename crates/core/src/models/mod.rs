pub mod coin;
pub mod intent;
pub mod metrics;
pub mod portfolio;
pub mod settings;
pub mod transaction;

pub mod metrics_service;
pub mod portfolio_service;
pub mod validation_service;

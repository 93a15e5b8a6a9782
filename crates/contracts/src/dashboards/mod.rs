pub mod metrics;
pub mod reports;

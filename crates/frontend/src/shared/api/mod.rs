//! Report Client: typed GET requests to the reporting backend.

pub mod client;
pub mod endpoint;
pub mod error;

pub use client::*;
pub use endpoint::{request_url, Endpoint};
pub use error::ApiError;

pub mod dto;
pub mod query;

pub use dto::*;
pub use query::*;

//! Data-fetch hooks: cached, retried, latest-wins access to the Report Client.

pub mod cache;
pub mod hooks;
pub mod options;
pub mod retry;
pub mod sequence;

pub use hooks::{
    invalidate, use_conversion, use_leads_metrics, use_manager_detail, use_query, use_report,
    use_sales_metrics, QueryHandle, QueryState,
};
pub use options::QueryOptions;

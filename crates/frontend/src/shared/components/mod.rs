pub mod alert_banner;
pub mod bar_chart;
pub mod card_animated;
pub mod date_input;
pub mod manager_list;
pub mod metric_card;
pub mod page_header;
pub mod period_selector;
pub mod query_status;

pub use alert_banner::AlertBanner;
pub use bar_chart::BarChart;
pub use card_animated::CardAnimated;
pub use date_input::DateInput;
pub use manager_list::ManagerList;
pub use metric_card::MetricCard;
pub use page_header::PageHeader;
pub use period_selector::PeriodSelector;
pub use query_status::QueryStatus;

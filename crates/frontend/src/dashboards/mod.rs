pub mod d100_home;
pub mod d101_leads;
pub mod d102_sales;
pub mod d103_manager_detail;
pub mod view_model;

pub use d100_home::ui::HomeDashboard;
pub use d101_leads::ui::LeadsDashboard;
pub use d102_sales::ui::SalesDashboard;
pub use d103_manager_detail::ui::ManagerDetailDashboard;

mod dashboard;

pub use dashboard::ManagerDetailDashboard;

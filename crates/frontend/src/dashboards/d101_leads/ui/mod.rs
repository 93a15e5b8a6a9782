mod dashboard;

pub use dashboard::LeadsDashboard;

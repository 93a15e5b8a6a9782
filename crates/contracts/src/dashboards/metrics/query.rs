use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `GET /api/metrics/leads?date&manager_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadsMetricsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// `GET /api/metrics/sales?date&manager_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesMetricsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// `GET /api/metrics/conversion?start_date&end_date`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// `GET /api/metrics/manager/{manager_id}?start_date&end_date`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagerDetailQuery {
    /// Travels in the path, not in the query string
    #[serde(skip)]
    pub manager_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ManagerDetailQuery {
    pub fn new(manager_id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            manager_id: manager_id.into(),
            start_date,
            end_date,
        }
    }
}

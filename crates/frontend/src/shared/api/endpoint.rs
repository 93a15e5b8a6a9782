use contracts::dashboards::metrics::{
    ConversionQuery, ConversionSlice, LeadsMetricsQuery, LeadsMetricsSlice, ManagerDetail,
    ManagerDetailQuery, SalesMetricsQuery, SalesMetricsSlice,
};
use contracts::dashboards::reports::{Report, ReportParams, ReportQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;

use super::client;
use super::error::ApiError;

/// One GET route of the reporting backend.
///
/// The implementing value is both the request parameters and the cache key.
pub trait Endpoint: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    type Response: DeserializeOwned + Clone + Send + Sync + 'static;
    type Params: Serialize;

    fn path(&self) -> String;
    fn params(&self) -> Self::Params;

    /// Required parameter that is absent. The request is not sent then.
    fn missing_parameter(&self) -> Option<&'static str> {
        None
    }

    /// One request through the Report Client.
    fn send(&self) -> impl Future<Output = Result<Self::Response, ApiError>> {
        client::fetch(self)
    }
}

impl Endpoint for ReportQuery {
    type Response = Report;
    type Params = ReportParams;

    fn path(&self) -> String {
        ReportQuery::path(self)
    }

    fn params(&self) -> ReportParams {
        ReportQuery::params(self)
    }

    fn missing_parameter(&self) -> Option<&'static str> {
        ReportQuery::missing_parameter(self)
    }

    fn send(&self) -> impl Future<Output = Result<Report, ApiError>> {
        client::get_report(self)
    }
}

impl Endpoint for LeadsMetricsQuery {
    type Response = LeadsMetricsSlice;
    type Params = Self;

    fn path(&self) -> String {
        "/api/metrics/leads".to_string()
    }

    fn params(&self) -> Self {
        self.clone()
    }

    fn send(&self) -> impl Future<Output = Result<LeadsMetricsSlice, ApiError>> {
        client::get_leads_metrics(self.date, self.manager_id.clone())
    }
}

impl Endpoint for SalesMetricsQuery {
    type Response = SalesMetricsSlice;
    type Params = Self;

    fn path(&self) -> String {
        "/api/metrics/sales".to_string()
    }

    fn params(&self) -> Self {
        self.clone()
    }

    fn send(&self) -> impl Future<Output = Result<SalesMetricsSlice, ApiError>> {
        client::get_sales_metrics(self.date, self.manager_id.clone())
    }
}

impl Endpoint for ConversionQuery {
    type Response = ConversionSlice;
    type Params = Self;

    fn path(&self) -> String {
        "/api/metrics/conversion".to_string()
    }

    fn params(&self) -> Self {
        self.clone()
    }

    fn send(&self) -> impl Future<Output = Result<ConversionSlice, ApiError>> {
        client::get_conversion(self.start_date, self.end_date)
    }
}

impl Endpoint for ManagerDetailQuery {
    type Response = ManagerDetail;
    type Params = Self;

    fn path(&self) -> String {
        format!(
            "/api/metrics/manager/{}",
            urlencoding::encode(self.manager_id.trim())
        )
    }

    fn params(&self) -> Self {
        self.clone()
    }

    fn missing_parameter(&self) -> Option<&'static str> {
        if self.manager_id.trim().is_empty() {
            Some("manager_id")
        } else {
            None
        }
    }

    fn send(&self) -> impl Future<Output = Result<ManagerDetail, ApiError>> {
        client::get_manager_detail(&self.manager_id, self.start_date, self.end_date)
    }
}

/// Full request URL: base + path + query string (no `?` when empty).
pub fn request_url<E: Endpoint>(base: &str, endpoint: &E) -> Result<String, ApiError> {
    let query = serde_qs::to_string(&endpoint.params())
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let base = base.trim_end_matches('/');
    if query.is_empty() {
        Ok(format!("{}{}", base, endpoint.path()))
    } else {
        Ok(format!("{}{}?{}", base, endpoint.path(), query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const BASE: &str = "http://localhost:8000/";

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_url() {
        let q = ReportQuery::Daily {
            date: Some(d(2024, 5, 1)),
        };
        assert_eq!(
            request_url(BASE, &q).unwrap(),
            "http://localhost:8000/api/reports/daily?date=2024-05-01"
        );
    }

    #[test]
    fn test_daily_without_date_has_no_query() {
        let q = ReportQuery::Daily { date: None };
        assert_eq!(
            request_url(BASE, &q).unwrap(),
            "http://localhost:8000/api/reports/daily"
        );
    }

    #[test]
    fn test_monthly_and_custom_urls() {
        let q = ReportQuery::Monthly {
            year: Some(2024),
            month: Some(5),
        };
        assert_eq!(
            request_url(BASE, &q).unwrap(),
            "http://localhost:8000/api/reports/monthly?year=2024&month=5"
        );

        let q = ReportQuery::Custom {
            start_date: d(2024, 4, 1),
            end_date: d(2024, 4, 30),
        };
        assert_eq!(
            request_url(BASE, &q).unwrap(),
            "http://localhost:8000/api/reports/custom?start_date=2024-04-01&end_date=2024-04-30"
        );
    }

    #[test]
    fn test_metrics_urls() {
        let q = LeadsMetricsQuery {
            date: Some(d(2024, 5, 1)),
            manager_id: None,
        };
        assert_eq!(
            request_url(BASE, &q).unwrap(),
            "http://localhost:8000/api/metrics/leads?date=2024-05-01"
        );

        let q = SalesMetricsQuery {
            date: None,
            manager_id: Some("15".to_string()),
        };
        assert_eq!(
            request_url(BASE, &q).unwrap(),
            "http://localhost:8000/api/metrics/sales?manager_id=15"
        );
    }

    #[test]
    fn test_manager_detail_path_is_escaped() {
        let q = ManagerDetailQuery::new("a b", d(2024, 4, 25), d(2024, 5, 1));
        assert_eq!(
            request_url(BASE, &q).unwrap(),
            "http://localhost:8000/api/metrics/manager/a%20b?start_date=2024-04-25&end_date=2024-05-01"
        );
        assert_eq!(q.missing_parameter(), None);
    }

    #[test]
    fn test_manager_detail_requires_id() {
        let q = ManagerDetailQuery::new("  ", d(2024, 4, 25), d(2024, 5, 1));
        assert_eq!(q.missing_parameter(), Some("manager_id"));
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unsupported value"))
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct BrokenParams;

    impl Endpoint for BrokenParams {
        type Response = serde_json::Value;
        type Params = Unencodable;

        fn path(&self) -> String {
            "/api/broken".to_string()
        }

        fn params(&self) -> Unencodable {
            Unencodable
        }
    }

    #[test]
    fn test_encode_failure_is_not_retried() {
        let err = request_url(BASE, &BrokenParams).unwrap_err();
        assert!(matches!(err, ApiError::Encode(ref m) if m.contains("unsupported value")));
        assert!(!err.is_transient());
    }
}

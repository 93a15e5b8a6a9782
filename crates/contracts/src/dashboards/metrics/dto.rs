use crate::dashboards::reports::Manager;
use crate::shared::count;
use crate::shared::ordered_map::OrderedMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `GET /api/metrics/leads`: lead counts for one day, optionally for one manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadsMetricsSlice {
    /// Absent when the backend had no leads for the day
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_leads: u64,
    #[serde(default, deserialize_with = "count::map")]
    pub by_source: OrderedMap<u64>,
    #[serde(default, deserialize_with = "count::map")]
    pub by_manager: OrderedMap<u64>,
    #[serde(default, deserialize_with = "count::map")]
    pub by_status: OrderedMap<u64>,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// `GET /api/metrics/sales`: contract amounts for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesMetricsSlice {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_contracts: u64,
    /// Amount per source
    #[serde(default)]
    pub by_source: OrderedMap<f64>,
    /// Amount per manager name
    #[serde(default)]
    pub by_manager: OrderedMap<f64>,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// `GET /api/metrics/conversion`: department conversion for a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionSlice {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_leads: u64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_deals: u64,
    /// Already rounded to two decimals by the backend
    #[serde(default)]
    pub total_cr: f64,
    #[serde(default)]
    pub by_manager: Vec<Manager>,
}

/// `GET /api/metrics/manager/{id}`: one manager over a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerDetail {
    pub manager_id: String,
    #[serde(default)]
    pub manager_name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_leads: u64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_deals: u64,
    #[serde(default)]
    pub cr_percent: f64,
    /// Opaque display string
    #[serde(default)]
    pub avg_reaction_time: Option<String>,
    #[serde(default, deserialize_with = "count::map")]
    pub by_status: OrderedMap<u64>,
    #[serde(default, deserialize_with = "count::map")]
    pub by_source: OrderedMap<u64>,
    #[serde(default)]
    pub leads_list: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_leads_slice() {
        // shape returned when the day has no leads at all
        let slice: LeadsMetricsSlice = serde_json::from_value(json!({
            "total_leads": 0,
            "by_source": {},
            "by_manager": {},
            "by_status": {},
            "details": []
        }))
        .unwrap();
        assert_eq!(slice, LeadsMetricsSlice::default());
    }

    #[test]
    fn test_sales_slice_amounts_keep_order() {
        let slice: SalesMetricsSlice = serde_json::from_str(
            r#"{
                "date": "2024-05-01",
                "total_amount": 25000.0,
                "total_contracts": 4,
                "by_source": {"instagram": 15000.0, "google": 10000.0},
                "by_manager": {"Ivanenko": 25000.0}
            }"#,
        )
        .unwrap();
        assert_eq!(slice.by_source.keys().collect::<Vec<_>>(), vec!["instagram", "google"]);
        assert_eq!(slice.by_source.total(), 25000.0);
    }

    #[test]
    fn test_conversion_slice_without_leads() {
        let slice: ConversionSlice =
            serde_json::from_value(json!({"total_cr": 0, "by_manager": []})).unwrap();
        assert_eq!(slice.total_leads, 0);
        assert_eq!(slice.total_cr, 0.0);
    }

    #[test]
    fn test_manager_detail() {
        let detail: ManagerDetail = serde_json::from_str(
            r#"{
                "manager_id": "17",
                "manager_name": "Ivanenko",
                "start_date": "2024-04-24",
                "end_date": "2024-05-01",
                "total_leads": 40,
                "total_deals": 9.0,
                "cr_percent": 22.5,
                "avg_reaction_time": null,
                "by_status": {"NEW": 10, "IN_PROCESS": 30.0},
                "by_source": {"instagram": 40},
                "leads_list": [{"ID": "1"}]
            }"#,
        )
        .unwrap();
        assert_eq!(detail.manager_name, "Ivanenko");
        assert_eq!(detail.avg_reaction_time, None);
        assert_eq!(detail.by_status.keys().collect::<Vec<_>>(), vec!["NEW", "IN_PROCESS"]);
        assert_eq!(detail.leads_list.len(), 1);
        assert_eq!(detail.total_deals, 9);
        assert_eq!(detail.by_status.total(), 40);
    }

    #[test]
    fn test_conversion_managers_with_float_counts() {
        let slice: ConversionSlice = serde_json::from_value(json!({
            "total_leads": 14,
            "total_deals": 3.0,
            "total_cr": 21.43,
            "by_manager": [
                {"ASSIGNED_BY_ID": "17", "FULL_NAME": "Ivanenko", "CR%": 30.0,
                 "number_of_leads": 10.0, "number_of_deals": 3.0},
                {"ASSIGNED_BY_ID": "21", "FULL_NAME": "Petrenko", "CR%": 0.0,
                 "number_of_leads": 4.0, "number_of_deals": 0.0}
            ]
        }))
        .unwrap();
        assert_eq!(slice.total_deals, 3);
        assert_eq!(slice.by_manager[0].number_of_leads, 10);
        assert_eq!(slice.by_manager[1].number_of_deals, 0);
    }
}

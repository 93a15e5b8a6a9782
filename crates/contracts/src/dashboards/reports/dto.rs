use crate::shared::count;
use crate::shared::ordered_map::OrderedMap;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Period a report was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 4] = [
        PeriodKind::Daily,
        PeriodKind::Weekly,
        PeriodKind::Monthly,
        PeriodKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Daily => "daily",
            PeriodKind::Weekly => "weekly",
            PeriodKind::Monthly => "monthly",
            PeriodKind::Custom => "custom",
        }
    }

    /// Daily reports cover one date, every other kind a start/end pair.
    pub fn is_single_day(&self) -> bool {
        matches!(self, PeriodKind::Daily)
    }
}

/// Time window of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportWindow {
    Day(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

impl ReportWindow {
    pub fn start(&self) -> NaiveDate {
        match self {
            ReportWindow::Day(date) => *date,
            ReportWindow::Range { start, .. } => *start,
        }
    }

    pub fn end(&self) -> NaiveDate {
        match self {
            ReportWindow::Day(date) => *date,
            ReportWindow::Range { end, .. } => *end,
        }
    }
}

/// Report document returned by `/api/reports/{daily,weekly,monthly,custom}`.
///
/// Decoded through [`ReportWire`], which checks that the window fields match
/// the period tag: `date` for daily, `start_date`/`end_date` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReportWire", into = "ReportWire")]
pub struct Report {
    pub period: PeriodKind,
    pub window: ReportWindow,
    /// Only present on monthly reports
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub leads: LeadsReport,
    pub sales: SalesReport,
    /// Daily reports only
    pub finmap: Option<FinmapData>,
    pub alerts: Vec<Alert>,
}

/// Report exactly as it travels over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default)]
    pub leads: LeadsReport,
    #[serde(default)]
    pub sales: SalesReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finmap: Option<FinmapData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<Alert>,
}

impl TryFrom<ReportWire> for Report {
    type Error = String;

    fn try_from(wire: ReportWire) -> Result<Self, Self::Error> {
        let window = match (wire.date, wire.start_date, wire.end_date) {
            (Some(date), None, None) => ReportWindow::Day(date),
            (None, Some(start), Some(end)) => ReportWindow::Range { start, end },
            (None, None, None) => return Err("report has no date window".to_string()),
            _ => {
                return Err(
                    "report must carry either `date` or `start_date`/`end_date`, not both"
                        .to_string(),
                )
            }
        };

        // The custom endpoint of older backends omits the tag
        let period = wire.period.unwrap_or(match window {
            ReportWindow::Day(_) => PeriodKind::Daily,
            ReportWindow::Range { .. } => PeriodKind::Custom,
        });

        if period.is_single_day() != matches!(window, ReportWindow::Day(_)) {
            return Err(format!(
                "{} report does not match its date window",
                period.as_str()
            ));
        }

        Ok(Report {
            period,
            window,
            year: wire.year,
            month: wire.month,
            leads: wire.leads,
            sales: wire.sales,
            finmap: wire.finmap,
            alerts: wire.alerts,
        })
    }
}

impl From<Report> for ReportWire {
    fn from(report: Report) -> Self {
        let (date, start_date, end_date) = match report.window {
            ReportWindow::Day(date) => (Some(date), None, None),
            ReportWindow::Range { start, end } => (None, Some(start), Some(end)),
        };
        ReportWire {
            period: Some(report.period),
            date,
            start_date,
            end_date,
            year: report.year,
            month: report.month,
            leads: report.leads,
            sales: report.sales,
            finmap: report.finmap,
            alerts: report.alerts,
        }
    }
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadsReport {
    #[serde(default)]
    pub metrics: LeadsMetrics,
    #[serde(default)]
    pub distribution: LeadsDistribution,
    /// Raw lead rows, passed through untouched
    #[serde(default)]
    pub leads_detail: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadsMetrics {
    #[serde(default)]
    pub by_manager: Vec<Manager>,
    /// Department median reaction time, already formatted by the backend
    #[serde(default)]
    pub department_median: Option<String>,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_leads: u64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_deals: u64,
}

impl LeadsMetrics {
    /// `total_deals <= total_leads`; the backend is trusted, callers only log violations.
    pub fn is_consistent(&self) -> bool {
        self.total_deals <= self.total_leads
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadsDistribution {
    #[serde(default, deserialize_with = "count::map")]
    pub by_source: OrderedMap<u64>,
    #[serde(default, deserialize_with = "count::map")]
    pub by_manager: OrderedMap<u64>,
    #[serde(default, deserialize_with = "count::map")]
    pub by_status: OrderedMap<u64>,
    /// day → hour → count
    #[serde(default, deserialize_with = "count::nested_map")]
    pub heatmap: OrderedMap<OrderedMap<u64>>,
}

/// Per-manager lead metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    #[serde(rename = "ASSIGNED_BY_ID")]
    pub assigned_by_id: String,
    #[serde(rename = "FULL_NAME")]
    pub full_name: String,
    /// Conversion percentage, 0..=100
    #[serde(rename = "CR%", default)]
    pub conversion_rate: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub number_of_leads: u64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub number_of_deals: u64,
    /// Opaque display string, never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken_in_work: Option<String>,
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub total_contracts: u64,
    #[serde(default)]
    pub by_manager: Vec<SalesByManager>,
    #[serde(default)]
    pub by_source: Vec<SalesBySource>,
    #[serde(default)]
    pub by_type: Vec<SalesByType>,
}

/// One (label, amount, count) row of a sales breakdown.
pub trait SalesBreakdown {
    fn label(&self) -> &str;
    fn amount(&self) -> f64;
    fn count(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesByManager {
    pub manager: String,
    #[serde(default)]
    pub contract_amount: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub number_of_contracts: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBySource {
    #[serde(rename = "UTM_SOURCE")]
    pub utm_source: String,
    #[serde(default)]
    pub contract_amount: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub number_of_contracts: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesByType {
    pub type_contract: String,
    #[serde(default)]
    pub contract_amount: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub number_of_contracts: u64,
}

macro_rules! impl_sales_breakdown {
    ($ty:ty, $label:ident) => {
        impl SalesBreakdown for $ty {
            fn label(&self) -> &str {
                &self.$label
            }
            fn amount(&self) -> f64 {
                self.contract_amount
            }
            fn count(&self) -> u64 {
                self.number_of_contracts
            }
        }
    };
}

impl_sales_breakdown!(SalesByManager, manager);
impl_sales_breakdown!(SalesBySource, utm_source);
impl_sales_breakdown!(SalesByType, type_contract);

// ---------------------------------------------------------------------------
// Finmap & alerts
// ---------------------------------------------------------------------------

/// Payments actually received according to Finmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinmapData {
    #[serde(default)]
    pub total: f64,
    #[serde(default, deserialize_with = "count::deserialize")]
    pub count: u64,
}

impl FinmapData {
    /// The backend always sends the section; zero means "no feed for this day".
    pub fn has_income(&self) -> bool {
        self.total > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Rule code, e.g. `conversion_drop`, `slow_reaction`
    #[serde(rename = "type", default)]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,
    /// ISO timestamp, usually without offset
    #[serde(default)]
    pub timestamp: String,
}

impl Alert {
    /// Wall-clock time of the alert. An offset (`Z`, `+03:00`) is accepted and dropped.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.naive_local()))
    }
}

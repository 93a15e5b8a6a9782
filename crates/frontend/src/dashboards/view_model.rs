//! Display values derived from a fetched report.
//!
//! Everything here is pure: same report in, same strings out. Missing data
//! degrades to zeros and "N/A", never to an error.

use contracts::dashboards::metrics::ManagerDetail;
use contracts::dashboards::reports::{
    Alert, AlertSeverity, FinmapData, Manager, Report, ReportWindow, SalesBreakdown,
};
use contracts::shared::ordered_map::OrderedMap;

use crate::shared::date_utils::{format_datetime, format_day};
use crate::shared::number_format::{format_number_trimmed, format_number_with_decimals};

pub const NOT_AVAILABLE: &str = "N/A";
pub const CURRENCY: &str = "грн";

/// Below this CR% a manager is highlighted in the list.
pub const LOW_CONVERSION_RATE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Conversion & trend
// ---------------------------------------------------------------------------

/// Deals per lead in percent; 0 when there are no leads.
pub fn conversion_rate_value(total_deals: u64, total_leads: u64) -> f64 {
    if total_leads == 0 {
        0.0
    } else {
        total_deals as f64 / total_leads as f64 * 100.0
    }
}

/// CR% with two decimals, e.g. `"24.00"`.
pub fn conversion_rate(total_deals: u64, total_leads: u64) -> String {
    format!("{:.2}", conversion_rate_value(total_deals, total_leads))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Neutral,
    Down,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Neutral => "→",
            Trend::Down => "↓",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Neutral => "neutral",
            Trend::Down => "down",
        }
    }
}

/// Rate at the precision it is shown with.
fn displayed_rate(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}

/// `> 20` up, `> 10` neutral, otherwise down. Compared as displayed, so
/// `"20.00"` is never tagged up.
pub fn classify_trend(rate: f64) -> Trend {
    let rate = displayed_rate(rate);
    if rate > 20.0 {
        Trend::Up
    } else if rate > 10.0 {
        Trend::Neutral
    } else {
        Trend::Down
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Label→count mapping as chart points, backend order kept.
pub fn distribution_series(distribution: &OrderedMap<u64>) -> Vec<SeriesPoint> {
    distribution
        .iter()
        .map(|(label, count)| SeriesPoint::new(label, *count as f64))
        .collect()
}

/// Same as [`distribution_series`] for amount mappings.
pub fn amount_series(amounts: &OrderedMap<f64>) -> Vec<SeriesPoint> {
    amounts
        .iter()
        .map(|(label, amount)| SeriesPoint::new(label, *amount))
        .collect()
}

/// Sum of a partition; equals `total_leads` on consistent reports.
pub fn distribution_total(distribution: &OrderedMap<u64>) -> u64 {
    distribution.total()
}

pub fn manager_leads_series(managers: &[Manager]) -> Vec<SeriesPoint> {
    managers
        .iter()
        .map(|m| SeriesPoint::new(m.full_name.clone(), m.number_of_leads as f64))
        .collect()
}

pub fn breakdown_amount_series<B: SalesBreakdown>(rows: &[B]) -> Vec<SeriesPoint> {
    rows.iter()
        .map(|r| SeriesPoint::new(r.label(), r.amount()))
        .collect()
}

/// Bar lengths in percent of the largest value.
pub fn scale_to_max(series: &[SeriesPoint]) -> Vec<f64> {
    let max = series
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    series
        .iter()
        .map(|p| {
            if max <= 0.0 || !p.value.is_finite() || p.value <= 0.0 {
                0.0
            } else {
                p.value / max * 100.0
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Up to three decimals, trailing zeros dropped: `1 234,5`.
pub fn format_number(value: f64) -> String {
    format_number_trimmed(value, 3)
}

/// Always two decimals: `15 000,00`.
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Money with currency: `15 000,00 грн`.
pub fn format_amount(value: f64) -> String {
    format!("{} {}", format_money(value), CURRENCY)
}

/// `25.00%`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", if value.is_finite() { value } else { 0.0 })
}

pub fn reaction_time_label(time: Option<&str>) -> String {
    match time.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn window_label(window: &ReportWindow) -> String {
    match window {
        ReportWindow::Day(date) => format_day(*date),
        ReportWindow::Range { start, end } => {
            format!("{} - {}", format_day(*start), format_day(*end))
        }
    }
}

// ---------------------------------------------------------------------------
// Managers
// ---------------------------------------------------------------------------

/// Exact name match, first one wins.
pub fn find_manager_by_name<'a>(managers: &'a [Manager], name: &str) -> Option<&'a Manager> {
    managers.iter().find(|m| m.full_name == name)
}

pub fn manager_cr_is_low(manager: &Manager) -> bool {
    manager.conversion_rate < LOW_CONVERSION_RATE
}

/// Row of the manager list.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerRow {
    pub id: String,
    pub name: String,
    pub cr: String,
    pub cr_is_low: bool,
    pub leads: u64,
    pub deals: u64,
    pub reaction_time: String,
}

impl ManagerRow {
    pub fn from_manager(manager: &Manager) -> Self {
        Self {
            id: manager.assigned_by_id.clone(),
            name: manager.full_name.clone(),
            cr: format_percent(manager.conversion_rate),
            cr_is_low: manager_cr_is_low(manager),
            leads: manager.number_of_leads,
            deals: manager.number_of_deals,
            reaction_time: reaction_time_label(manager.time_taken_in_work.as_deref()),
        }
    }
}

pub fn manager_rows(managers: &[Manager]) -> Vec<ManagerRow> {
    managers.iter().map(ManagerRow::from_manager).collect()
}

// ---------------------------------------------------------------------------
// Sales, finmap, alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub label: String,
    pub amount: String,
    pub count: u64,
}

pub fn sales_rows<B: SalesBreakdown>(rows: &[B]) -> Vec<SalesRow> {
    rows.iter()
        .map(|r| SalesRow {
            label: r.label().to_string(),
            amount: format_amount(r.amount()),
            count: r.count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinmapView {
    pub amount: String,
    pub count: u64,
}

/// Shown only when money actually came in.
pub fn finmap_view(finmap: Option<&FinmapData>) -> Option<FinmapView> {
    finmap.filter(|f| f.has_income()).map(|f| FinmapView {
        amount: format_amount(f.total),
        count: f.count,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertView {
    pub severity: AlertSeverity,
    pub icon: &'static str,
    /// BEM modifier: `alert-banner__item--critical`
    pub modifier: &'static str,
    pub title: String,
    pub description: String,
    pub manager_name: Option<String>,
    pub time: Option<String>,
}

impl AlertView {
    pub fn from_alert(alert: &Alert) -> Self {
        let (icon, modifier) = match alert.severity {
            AlertSeverity::Critical => ("🔴", "critical"),
            AlertSeverity::Warning => ("🟡", "warning"),
            AlertSeverity::Info => ("🔵", "info"),
        };
        Self {
            severity: alert.severity,
            icon,
            modifier,
            title: alert.title.clone(),
            description: alert.description.clone(),
            manager_name: alert.manager_name.clone().filter(|n| !n.is_empty()),
            time: alert.created_at().map(format_datetime),
        }
    }
}

/// Delivered order is display order.
pub fn alert_views(alerts: &[Alert]) -> Vec<AlertView> {
    alerts.iter().map(AlertView::from_alert).collect()
}

// ---------------------------------------------------------------------------
// Page view-models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HomeViewModel {
    pub window: Option<String>,
    pub total_leads: u64,
    pub source_count: usize,
    pub total_deals: u64,
    pub total_contracts: u64,
    pub sales_amount: String,
    pub conversion_rate: String,
    pub trend: Trend,
    /// `12 з 50`
    pub trend_caption: String,
    pub reaction_time: String,
    pub finmap: Option<FinmapView>,
    pub alerts: Vec<AlertView>,
}

impl HomeViewModel {
    pub fn from_report(report: Option<&Report>) -> Self {
        let leads = report.map(|r| &r.leads.metrics);
        let total_leads = leads.map(|m| m.total_leads).unwrap_or(0);
        let total_deals = leads.map(|m| m.total_deals).unwrap_or(0);
        let rate = conversion_rate_value(total_deals, total_leads);

        Self {
            window: report.map(|r| window_label(&r.window)),
            total_leads,
            source_count: report
                .map(|r| r.leads.distribution.by_source.len())
                .unwrap_or(0),
            total_deals,
            total_contracts: report.map(|r| r.sales.total_contracts).unwrap_or(0),
            sales_amount: format_amount(report.map(|r| r.sales.total_amount).unwrap_or(0.0)),
            conversion_rate: conversion_rate(total_deals, total_leads),
            trend: classify_trend(rate),
            trend_caption: format!("{} з {}", total_deals, total_leads),
            reaction_time: reaction_time_label(leads.and_then(|m| m.department_median.as_deref())),
            finmap: finmap_view(report.and_then(|r| r.finmap.as_ref())),
            alerts: report.map(|r| alert_views(&r.alerts)).unwrap_or_default(),
        }
    }
}

/// Drill-down panel of one manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerDrillDown {
    pub id: String,
    pub name: String,
    pub leads: u64,
    pub deals: u64,
    pub cr: String,
    pub reaction_time: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadsViewModel {
    pub total_leads: u64,
    pub total_deals: u64,
    pub reaction_time: String,
    pub sources: Vec<SeriesPoint>,
    pub managers: Vec<SeriesPoint>,
    pub statuses: Vec<SeriesPoint>,
    pub manager_rows: Vec<ManagerRow>,
    managers_raw: Vec<Manager>,
}

impl LeadsViewModel {
    pub fn from_report(report: Option<&Report>) -> Self {
        let Some(report) = report else {
            return Self {
                reaction_time: NOT_AVAILABLE.to_string(),
                ..Default::default()
            };
        };
        let metrics = &report.leads.metrics;
        let distribution = &report.leads.distribution;
        if !metrics.is_consistent() {
            log::warn!(
                "report has more deals ({}) than leads ({})",
                metrics.total_deals,
                metrics.total_leads
            );
        }
        Self {
            total_leads: metrics.total_leads,
            total_deals: metrics.total_deals,
            reaction_time: reaction_time_label(metrics.department_median.as_deref()),
            sources: distribution_series(&distribution.by_source),
            managers: manager_leads_series(&metrics.by_manager),
            statuses: distribution_series(&distribution.by_status),
            manager_rows: manager_rows(&metrics.by_manager),
            managers_raw: metrics.by_manager.clone(),
        }
    }

    /// Slice of the selected manager; `None` when the name is unknown.
    pub fn drill_down(&self, name: &str) -> Option<ManagerDrillDown> {
        find_manager_by_name(&self.managers_raw, name).map(|m| ManagerDrillDown {
            id: m.assigned_by_id.clone(),
            name: m.full_name.clone(),
            leads: m.number_of_leads,
            deals: m.number_of_deals,
            cr: format_percent(m.conversion_rate),
            reaction_time: reaction_time_label(m.time_taken_in_work.as_deref()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesViewModel {
    pub total_amount: String,
    pub total_contracts: u64,
    pub finmap: Option<FinmapView>,
    pub types: Vec<SalesRow>,
    pub manager_amounts: Vec<SeriesPoint>,
    pub source_amounts: Vec<SeriesPoint>,
    pub manager_rows: Vec<SalesRow>,
}

impl SalesViewModel {
    pub fn from_report(report: Option<&Report>) -> Self {
        let sales = report.map(|r| &r.sales);
        Self {
            total_amount: format_amount(sales.map(|s| s.total_amount).unwrap_or(0.0)),
            total_contracts: sales.map(|s| s.total_contracts).unwrap_or(0),
            finmap: finmap_view(report.and_then(|r| r.finmap.as_ref())),
            types: sales.map(|s| sales_rows(&s.by_type)).unwrap_or_default(),
            manager_amounts: sales
                .map(|s| breakdown_amount_series(&s.by_manager))
                .unwrap_or_default(),
            source_amounts: sales
                .map(|s| breakdown_amount_series(&s.by_source))
                .unwrap_or_default(),
            manager_rows: sales.map(|s| sales_rows(&s.by_manager)).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManagerDetailViewModel {
    pub name: String,
    pub total_leads: u64,
    pub total_deals: u64,
    pub cr: String,
    pub trend: Trend,
    pub reaction_time: String,
    pub sources: Vec<SeriesPoint>,
    pub statuses: Vec<SeriesPoint>,
    pub lead_count: usize,
}

impl ManagerDetailViewModel {
    pub fn from_detail(detail: Option<&ManagerDetail>) -> Self {
        let cr = detail.map(|d| d.cr_percent).unwrap_or(0.0);
        Self {
            name: detail.map(|d| d.manager_name.clone()).unwrap_or_default(),
            total_leads: detail.map(|d| d.total_leads).unwrap_or(0),
            total_deals: detail.map(|d| d.total_deals).unwrap_or(0),
            cr: format_percent(cr),
            trend: classify_trend(cr),
            reaction_time: reaction_time_label(
                detail.and_then(|d| d.avg_reaction_time.as_deref()),
            ),
            sources: detail
                .map(|d| distribution_series(&d.by_source))
                .unwrap_or_default(),
            statuses: detail
                .map(|d| distribution_series(&d.by_status))
                .unwrap_or_default(),
            lead_count: detail.map(|d| d.leads_list.len()).unwrap_or(0),
        }
    }
}

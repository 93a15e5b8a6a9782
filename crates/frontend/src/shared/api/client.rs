use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;
use contracts::dashboards::metrics::{
    ConversionQuery, ConversionSlice, LeadsMetricsQuery, LeadsMetricsSlice, ManagerDetail,
    ManagerDetailQuery, SalesMetricsQuery, SalesMetricsSlice,
};
use contracts::dashboards::reports::{Report, ReportQuery};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use web_sys::AbortController;

use super::endpoint::{request_url, Endpoint};
use super::error::{interpret_response, ApiError};
use crate::shared::config::app_config;

/// Один запрос к бэкенду отчётов. Без повторов и без состояния.
pub async fn fetch<E: Endpoint>(endpoint: &E) -> Result<E::Response, ApiError> {
    if let Some(name) = endpoint.missing_parameter() {
        return Err(ApiError::MissingParameter(name));
    }
    let config = app_config();
    let url = request_url(&config.api_base_url, endpoint)?;
    get_json(&url, config.request_timeout_ms).await
}

async fn get_json<T: DeserializeOwned>(url: &str, timeout_ms: u32) -> Result<T, ApiError> {
    let controller =
        AbortController::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    let timed_out = Rc::new(Cell::new(false));

    // Dropping the timer before it fires cancels it
    let _timer = {
        let controller = controller.clone();
        let timed_out = timed_out.clone();
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    log::debug!("GET {}", url);
    let signal = controller.signal();
    let response = Request::get(url)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .abort_signal(Some(&signal))
        .send()
        .await
        .map_err(|e| {
            if timed_out.get() {
                ApiError::Timeout {
                    after_ms: timeout_ms,
                }
            } else {
                ApiError::Network(format!("Request failed: {}", e))
            }
        })?;

    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.map_err(|e| {
        if timed_out.get() {
            ApiError::Timeout {
                after_ms: timeout_ms,
            }
        } else {
            ApiError::Network(format!("Failed to read response: {}", e))
        }
    })?;

    let result = interpret_response(status, &status_text, &body);
    if let Err(err) = &result {
        log::warn!("GET {} failed: {}", url, err);
    }
    result
}

/// Отчёт за день. `None` = вчера (по умолчанию на бэкенде)
pub async fn get_daily(date: Option<NaiveDate>) -> Result<Report, ApiError> {
    fetch(&ReportQuery::Daily { date }).await
}

/// Отчёт за неделю
pub async fn get_weekly(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Report, ApiError> {
    fetch(&ReportQuery::Weekly {
        start_date,
        end_date,
    })
    .await
}

/// Отчёт за месяц
pub async fn get_monthly(year: Option<i32>, month: Option<u32>) -> Result<Report, ApiError> {
    fetch(&ReportQuery::Monthly { year, month }).await
}

/// Отчёт за произвольный период, обе даты обязательны
pub async fn get_custom(start_date: NaiveDate, end_date: NaiveDate) -> Result<Report, ApiError> {
    fetch(&ReportQuery::Custom {
        start_date,
        end_date,
    })
    .await
}

/// Диспетчер по виду периода, через него идут запросы слоя кэша
pub async fn get_report(query: &ReportQuery) -> Result<Report, ApiError> {
    match *query {
        ReportQuery::Daily { date } => get_daily(date).await,
        ReportQuery::Weekly {
            start_date,
            end_date,
        } => get_weekly(start_date, end_date).await,
        ReportQuery::Monthly { year, month } => get_monthly(year, month).await,
        ReportQuery::Custom {
            start_date,
            end_date,
        } => get_custom(start_date, end_date).await,
    }
}

pub async fn get_leads_metrics(
    date: Option<NaiveDate>,
    manager_id: Option<String>,
) -> Result<LeadsMetricsSlice, ApiError> {
    fetch(&LeadsMetricsQuery { date, manager_id }).await
}

pub async fn get_sales_metrics(
    date: Option<NaiveDate>,
    manager_id: Option<String>,
) -> Result<SalesMetricsSlice, ApiError> {
    fetch(&SalesMetricsQuery { date, manager_id }).await
}

pub async fn get_conversion(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<ConversionSlice, ApiError> {
    fetch(&ConversionQuery {
        start_date,
        end_date,
    })
    .await
}

/// Детализация по менеджеру
pub async fn get_manager_detail(
    manager_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<ManagerDetail, ApiError> {
    fetch(&ManagerDetailQuery::new(manager_id, start_date, end_date)).await
}

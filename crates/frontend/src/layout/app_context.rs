use chrono::{Duration, NaiveDate};
use contracts::dashboards::reports::{PeriodKind, ReportQuery};
use leptos::prelude::*;

use crate::shared::api::Endpoint;
use crate::shared::date_utils::{today, yesterday_of};
use crate::shared::query::QueryHandle;

/// UI state shared by the pages: picked date and period, busy flag, last error.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub selected_date: RwSignal<NaiveDate>,
    pub selected_period: RwSignal<PeriodKind>,
    /// Custom period, always `start <= end`
    pub date_range: RwSignal<(NaiveDate, NaiveDate)>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::starting_at(today())
    }

    /// Reports are final for yesterday, so that is the default date.
    pub fn starting_at(today: NaiveDate) -> Self {
        let yesterday = yesterday_of(today);
        Self {
            selected_date: RwSignal::new(yesterday),
            selected_period: RwSignal::new(PeriodKind::Daily),
            date_range: RwSignal::new((yesterday - Duration::days(6), yesterday)),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn set_selected_date(&self, date: NaiveDate) {
        self.selected_date.set(date);
    }

    pub fn set_selected_period(&self, period: PeriodKind) {
        self.selected_period.set(period);
    }

    pub fn set_date_range(&self, range: (NaiveDate, NaiveDate)) {
        let (start, end) = range;
        self.date_range
            .set(if start <= end { (start, end) } else { (end, start) });
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.error.set(error);
    }

    /// Report request for the current selection. Tracked.
    pub fn report_query(&self) -> ReportQuery {
        ReportQuery::for_period(
            self.selected_period.get(),
            self.selected_date.get(),
            self.date_range.get(),
        )
    }

    /// Mirror a query slot into `loading` / `error`.
    pub fn track<E: Endpoint>(&self, handle: QueryHandle<E>) {
        let ctx = *self;
        Effect::new(move |_| {
            ctx.set_loading(handle.is_loading());
            ctx.set_error(handle.error_message());
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext not provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_defaults() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppContext::starting_at(d(2024, 5, 2));
            assert_eq!(ctx.selected_date.get_untracked(), d(2024, 5, 1));
            assert_eq!(ctx.selected_period.get_untracked(), PeriodKind::Daily);
            assert_eq!(ctx.date_range.get_untracked(), (d(2024, 4, 25), d(2024, 5, 1)));
            assert!(!ctx.loading.get_untracked());
            assert_eq!(ctx.error.get_untracked(), None);
        });
    }

    #[test]
    fn test_report_query_follows_selection() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppContext::starting_at(d(2024, 5, 2));
            assert_eq!(
                ctx.report_query(),
                ReportQuery::Daily {
                    date: Some(d(2024, 5, 1))
                }
            );

            ctx.set_selected_period(PeriodKind::Monthly);
            assert_eq!(
                ctx.report_query(),
                ReportQuery::Monthly {
                    year: Some(2024),
                    month: Some(5)
                }
            );

            ctx.set_selected_period(PeriodKind::Custom);
            ctx.set_date_range((d(2024, 4, 30), d(2024, 4, 1)));
            assert_eq!(
                ctx.report_query(),
                ReportQuery::Custom {
                    start_date: d(2024, 4, 1),
                    end_date: d(2024, 4, 30)
                }
            );
        });
    }
}

use super::dto::PeriodKind;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Parameters of one report request. Also the cache key of the report query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "lowercase")]
pub enum ReportQuery {
    /// `None` lets the backend pick (yesterday)
    Daily { date: Option<NaiveDate> },
    Weekly {
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    },
    Monthly {
        year: Option<i32>,
        month: Option<u32>,
    },
    Custom {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

/// Query-string parameters of `/api/reports/*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl ReportQuery {
    /// Query for `kind` anchored on `date`.
    ///
    /// Weekly covers the seven days ending on `date`, monthly the calendar month
    /// containing it. Custom uses `range` as is.
    pub fn for_period(kind: PeriodKind, date: NaiveDate, range: (NaiveDate, NaiveDate)) -> Self {
        match kind {
            PeriodKind::Daily => ReportQuery::Daily { date: Some(date) },
            PeriodKind::Weekly => ReportQuery::Weekly {
                start_date: Some(date - Duration::days(6)),
                end_date: Some(date),
            },
            PeriodKind::Monthly => ReportQuery::Monthly {
                year: Some(date.year()),
                month: Some(date.month()),
            },
            PeriodKind::Custom => {
                let (start_date, end_date) = if range.0 <= range.1 {
                    range
                } else {
                    (range.1, range.0)
                };
                ReportQuery::Custom {
                    start_date,
                    end_date,
                }
            }
        }
    }

    pub fn kind(&self) -> PeriodKind {
        match self {
            ReportQuery::Daily { .. } => PeriodKind::Daily,
            ReportQuery::Weekly { .. } => PeriodKind::Weekly,
            ReportQuery::Monthly { .. } => PeriodKind::Monthly,
            ReportQuery::Custom { .. } => PeriodKind::Custom,
        }
    }

    pub fn path(&self) -> String {
        format!("/api/reports/{}", self.kind().as_str())
    }

    pub fn params(&self) -> ReportParams {
        match self.clone() {
            ReportQuery::Daily { date } => ReportParams {
                date,
                ..Default::default()
            },
            ReportQuery::Weekly {
                start_date,
                end_date,
            } => ReportParams {
                start_date,
                end_date,
                ..Default::default()
            },
            ReportQuery::Monthly { year, month } => ReportParams {
                year,
                month,
                ..Default::default()
            },
            ReportQuery::Custom {
                start_date,
                end_date,
            } => ReportParams {
                start_date: Some(start_date),
                end_date: Some(end_date),
                ..Default::default()
            },
        }
    }

    /// Name of a parameter the backend needs but the query leaves out.
    ///
    /// The backend falls back to defaults for half-filled weekly windows and
    /// monthly periods, so only pairs that are half present are rejected.
    pub fn missing_parameter(&self) -> Option<&'static str> {
        match self {
            ReportQuery::Weekly {
                start_date: Some(_),
                end_date: None,
            } => Some("end_date"),
            ReportQuery::Weekly {
                start_date: None,
                end_date: Some(_),
            } => Some("start_date"),
            ReportQuery::Monthly {
                year: Some(_),
                month: None,
            } => Some("month"),
            ReportQuery::Monthly {
                year: None,
                month: Some(_),
            } => Some("year"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_for_period() {
        let anchor = d(2024, 5, 1);
        let range = (d(2024, 4, 1), d(2024, 4, 10));

        assert_eq!(
            ReportQuery::for_period(PeriodKind::Daily, anchor, range),
            ReportQuery::Daily {
                date: Some(anchor)
            }
        );
        assert_eq!(
            ReportQuery::for_period(PeriodKind::Weekly, anchor, range),
            ReportQuery::Weekly {
                start_date: Some(d(2024, 4, 25)),
                end_date: Some(anchor)
            }
        );
        assert_eq!(
            ReportQuery::for_period(PeriodKind::Monthly, anchor, range),
            ReportQuery::Monthly {
                year: Some(2024),
                month: Some(5)
            }
        );
        assert_eq!(
            ReportQuery::for_period(PeriodKind::Custom, anchor, (range.1, range.0)),
            ReportQuery::Custom {
                start_date: range.0,
                end_date: range.1
            }
        );
    }

    #[test]
    fn test_path_and_params() {
        let query = ReportQuery::Custom {
            start_date: d(2024, 4, 1),
            end_date: d(2024, 4, 10),
        };
        assert_eq!(query.path(), "/api/reports/custom");
        assert_eq!(query.params().start_date, Some(d(2024, 4, 1)));
        assert_eq!(query.params().date, None);

        let daily = ReportQuery::Daily { date: None };
        assert_eq!(daily.path(), "/api/reports/daily");
        assert_eq!(daily.params(), ReportParams::default());
    }

    #[test]
    fn test_missing_parameter() {
        assert_eq!(ReportQuery::Daily { date: None }.missing_parameter(), None);
        assert_eq!(
            ReportQuery::Weekly {
                start_date: None,
                end_date: None
            }
            .missing_parameter(),
            None
        );
        assert_eq!(
            ReportQuery::Weekly {
                start_date: Some(d(2024, 4, 1)),
                end_date: None
            }
            .missing_parameter(),
            Some("end_date")
        );
        assert_eq!(
            ReportQuery::Monthly {
                year: None,
                month: Some(4)
            }
            .missing_parameter(),
            Some("year")
        );
    }
}

//! Leptos glue over [`QueryCache`]: one `use_query` per UI slot.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{NaiveDate, Utc};
use contracts::dashboards::metrics::{
    ConversionQuery, LeadsMetricsQuery, ManagerDetailQuery, SalesMetricsQuery,
};
use contracts::dashboards::reports::ReportQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::cache::{Lookup, QueryCache, Waiter};
use super::options::QueryOptions;
use super::retry::{browser_sleep, with_retry};
use super::sequence::RequestSequence;
use crate::shared::api::{ApiError, Endpoint};
use crate::shared::config::app_config;

/// State of one query slot.
#[derive(Debug, Clone, Default)]
pub enum QueryState<T> {
    /// Disabled or waiting for parameters
    #[default]
    Idle,
    Loading,
    Error(ApiError),
    Data(T),
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => QueryState::Data(data),
            Err(err) => QueryState::Error(err),
        }
    }
}

type SharedCache<E> = Rc<RefCell<QueryCache<E, <E as Endpoint>::Response>>>;

thread_local! {
    static CACHES: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Process-wide cache of endpoint `E`.
fn shared_cache<E: Endpoint>() -> SharedCache<E> {
    CACHES.with(|caches| {
        let mut caches = caches.borrow_mut();
        let type_id = TypeId::of::<E>();
        if let Some(existing) = caches
            .get(&type_id)
            .cloned()
            .and_then(|cache| cache.downcast::<RefCell<QueryCache<E, E::Response>>>().ok())
        {
            return existing;
        }
        let fresh: SharedCache<E> = Rc::new(RefCell::new(QueryCache::new()));
        caches.insert(type_id, fresh.clone() as Rc<dyn Any>);
        fresh
    })
}

/// Mark the cached result of `key` stale.
pub fn invalidate<E: Endpoint>(key: &E) {
    shared_cache::<E>().borrow_mut().invalidate(key);
}

/// Handle of one query slot. `Copy`, so it can move into any closure.
pub struct QueryHandle<E: Endpoint> {
    key: Signal<Option<E>>,
    state: RwSignal<QueryState<E::Response>>,
    sequence: StoredValue<RequestSequence>,
    options: QueryOptions,
}

impl<E: Endpoint> Clone for QueryHandle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Endpoint> Copy for QueryHandle<E> {}

impl<E: Endpoint> QueryHandle<E> {
    pub fn state(&self) -> ReadSignal<QueryState<E::Response>> {
        self.state.read_only()
    }

    /// Tracked copy of the loaded data.
    pub fn data(&self) -> Option<E::Response> {
        self.state.with(|s| s.data().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.is_loading())
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.with(|s| s.error().map(|e| e.to_string()))
    }

    /// Drop the cached result and fetch again.
    pub fn refetch(&self) {
        self.start(true);
    }

    fn start(&self, force: bool) {
        let Some((key, token)) = self.issue(force) else {
            return;
        };
        let cache = shared_cache::<E>();
        let retries = self.options.retry;
        spawn_local(async move {
            let result = with_retry(retries, || key.send(), browser_sleep).await;
            if let Err(err) = &result {
                log::error!("{:?} failed: {}", key, err);
            }
            let resolution = cache.borrow_mut().resolve(&key, token, &result, Utc::now());
            if resolution.deliver(&result) == 0 {
                log::debug!("fetch #{} superseded, result discarded", token);
            }
        });
    }

    /// Register this slot with the cache. Returns the key and token of a
    /// request the caller must send, if one is needed.
    fn issue(&self, force: bool) -> Option<(E, u64)> {
        let Some(key) = self.key.try_get_untracked().flatten() else {
            self.sequence.try_update_value(|s| s.supersede());
            self.state.try_set(QueryState::Idle);
            return None;
        };
        if !self.options.enabled {
            self.state.try_set(QueryState::Idle);
            return None;
        }
        let seq = self.sequence.try_update_value(|s| s.issue())?;

        let state = self.state;
        let sequence = self.sequence;
        let waiter: Waiter<E::Response> = Box::new(move |result| {
            let current = sequence
                .try_with_value(|s| s.is_current(seq))
                .unwrap_or(false);
            if !current {
                log::debug!("query slot moved on, result #{} dropped", seq);
                return;
            }
            state.try_set(QueryState::from_result(result));
        });

        let lookup = {
            let cache = shared_cache::<E>();
            let mut cache = cache.borrow_mut();
            let now = Utc::now();
            let dropped = cache.collect_garbage(now, self.options.gc_time);
            if dropped > 0 {
                log::debug!("cache gc: {} entries dropped", dropped);
            }
            if force {
                cache.invalidate(&key);
                let token = cache.refetch(&key, waiter);
                Lookup::Issue {
                    token,
                    stale: cache.peek(&key).cloned(),
                }
            } else {
                cache.lookup(&key, now, self.options.stale_time, waiter)
            }
        };

        let show_pending = |stale: Option<E::Response>| {
            state.try_set(match stale {
                Some(data) => QueryState::Data(data),
                None => QueryState::Loading,
            });
        };

        match lookup {
            Lookup::Fresh(data) => {
                log::debug!("cache hit {:?}", key);
                state.try_set(QueryState::Data(data));
                None
            }
            Lookup::Joined { stale } => {
                log::debug!("joined in-flight {:?}", key);
                show_pending(stale);
                None
            }
            Lookup::Issue { token, stale } => {
                log::debug!("fetch #{} {:?}", token, key);
                show_pending(stale);
                Some((key, token))
            }
        }
    }
}

/// Fetch `E` whenever `key` changes. `None` keeps the slot idle.
pub fn use_query<E: Endpoint>(key: Signal<Option<E>>, options: QueryOptions) -> QueryHandle<E> {
    let handle = QueryHandle {
        key,
        state: RwSignal::new(QueryState::Idle),
        sequence: StoredValue::new(RequestSequence::new()),
        options,
    };

    Effect::new(move |_| {
        key.track();
        handle.start(false);
    });

    if options.refetch_on_focus {
        subscribe_focus(handle);
    }

    handle
}

fn subscribe_focus<E: Endpoint>(handle: QueryHandle<E>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let handler = Closure::wrap(Box::new(move |_: web_sys::Event| {
        handle.start(false);
    }) as Box<dyn FnMut(_)>);
    if window
        .add_event_listener_with_callback("focus", handler.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("focus listener not attached");
        return;
    }

    // Closure is not Send, keep it local and detach it with the owner
    let stored = StoredValue::new_local(Some(handler));
    on_cleanup(move || {
        let Some(handler) = stored.try_update_value(|h| h.take()).flatten() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback("focus", handler.as_ref().unchecked_ref());
        }
    });
}

fn default_options() -> QueryOptions {
    app_config().query
}

pub fn use_report(query: Signal<Option<ReportQuery>>) -> QueryHandle<ReportQuery> {
    use_query(query, default_options())
}

/// Idle until the date is picked.
pub fn use_leads_metrics(
    date: Signal<Option<NaiveDate>>,
    manager_id: Signal<Option<String>>,
) -> QueryHandle<LeadsMetricsQuery> {
    let key = Signal::derive(move || {
        date.get().map(|date| LeadsMetricsQuery {
            date: Some(date),
            manager_id: manager_id.get(),
        })
    });
    use_query(key, default_options())
}

pub fn use_sales_metrics(
    date: Signal<Option<NaiveDate>>,
    manager_id: Signal<Option<String>>,
) -> QueryHandle<SalesMetricsQuery> {
    let key = Signal::derive(move || {
        date.get().map(|date| SalesMetricsQuery {
            date: Some(date),
            manager_id: manager_id.get(),
        })
    });
    use_query(key, default_options())
}

pub fn use_conversion(
    range: Signal<Option<(NaiveDate, NaiveDate)>>,
) -> QueryHandle<ConversionQuery> {
    let key = Signal::derive(move || {
        range.get().map(|(start_date, end_date)| ConversionQuery {
            start_date,
            end_date,
        })
    });
    use_query(key, default_options())
}

/// Idle until the manager id is known.
pub fn use_manager_detail(
    manager_id: Signal<Option<String>>,
    range: Signal<(NaiveDate, NaiveDate)>,
) -> QueryHandle<ManagerDetailQuery> {
    let key = Signal::derive(move || {
        let (start, end) = range.get();
        manager_id
            .get()
            .filter(|id| !id.trim().is_empty())
            .map(|id| ManagerDetailQuery::new(id, start, end))
    });
    use_query(key, default_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::metrics::ConversionSlice;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate) -> ConversionQuery {
        ConversionQuery {
            start_date: start,
            end_date: end,
        }
    }

    fn slice(total_cr: f64) -> ConversionSlice {
        ConversionSlice {
            total_cr,
            ..Default::default()
        }
    }

    fn handle_for(key: RwSignal<Option<ConversionQuery>>) -> QueryHandle<ConversionQuery> {
        QueryHandle {
            key: key.into(),
            state: RwSignal::new(QueryState::Idle),
            sequence: StoredValue::new(RequestSequence::new()),
            options: QueryOptions::default(),
        }
    }

    /// Answer the pending request of `key` the way the fetch task does.
    fn answer(key: &ConversionQuery, token: u64, result: Result<ConversionSlice, ApiError>) -> usize {
        let resolution = shared_cache::<ConversionQuery>()
            .borrow_mut()
            .resolve(key, token, &result, Utc::now());
        resolution.deliver(&result)
    }

    #[test]
    fn test_query_state_accessors() {
        let loading: QueryState<u32> = QueryState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.data(), None);

        let data = QueryState::Data(5u32);
        assert_eq!(data.data(), Some(&5));
        assert!(!data.is_loading());

        let failed: QueryState<u32> = QueryState::Error(ApiError::MissingParameter("date"));
        assert_eq!(failed.error(), Some(&ApiError::MissingParameter("date")));
        assert!(matches!(QueryState::<u32>::default(), QueryState::Idle));
    }

    #[test]
    fn test_from_result() {
        assert!(matches!(QueryState::from_result(Ok(1u8)), QueryState::Data(1)));
        assert!(matches!(
            QueryState::<u8>::from_result(Err(ApiError::Parse("eof".into()))),
            QueryState::Error(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_slow_answer_for_old_key_is_ignored() {
        let owner = Owner::new();
        owner.with(|| {
            let first = window(d(2031, 1, 1), d(2031, 1, 7));
            let second = window(d(2031, 2, 1), d(2031, 2, 7));
            let key = RwSignal::new(Some(first.clone()));
            let handle = handle_for(key);

            let (_, slow) = handle.issue(false).unwrap();
            assert!(handle.is_loading());
            key.set(Some(second.clone()));
            let (_, fast) = handle.issue(false).unwrap();

            assert_eq!(answer(&second, fast, Ok(slice(30.0))), 1);
            // The first window's request still reaches its waiter, which drops it
            assert_eq!(answer(&first, slow, Ok(slice(5.0))), 1);

            assert_eq!(handle.data(), Some(slice(30.0)));
            // Cached under its own key all the same
            assert_eq!(
                shared_cache::<ConversionQuery>().borrow().peek(&first),
                Some(&slice(5.0))
            );
        });
    }

    #[test]
    fn test_slow_error_for_old_key_is_ignored() {
        let owner = Owner::new();
        owner.with(|| {
            let first = window(d(2032, 1, 1), d(2032, 1, 7));
            let second = window(d(2032, 2, 1), d(2032, 2, 7));
            let key = RwSignal::new(Some(first.clone()));
            let handle = handle_for(key);

            let (_, slow) = handle.issue(false).unwrap();
            key.set(Some(second.clone()));
            let (_, fast) = handle.issue(false).unwrap();

            answer(&second, fast, Ok(slice(12.5)));
            answer(&first, slow, Err(ApiError::Timeout { after_ms: 30_000 }));

            assert_eq!(handle.data(), Some(slice(12.5)));
            assert_eq!(handle.error_message(), None);
        });
    }

    #[test]
    fn test_cleared_key_goes_idle_and_drops_pending_answer() {
        let owner = Owner::new();
        owner.with(|| {
            let only = window(d(2033, 3, 1), d(2033, 3, 7));
            let key = RwSignal::new(Some(only.clone()));
            let handle = handle_for(key);

            let (_, token) = handle.issue(false).unwrap();
            key.set(None);
            assert!(handle.issue(false).is_none());

            answer(&only, token, Ok(slice(40.0)));
            assert!(matches!(handle.state().get_untracked(), QueryState::Idle));
        });
    }

    #[test]
    fn test_second_slot_joins_pending_request() {
        let owner = Owner::new();
        owner.with(|| {
            let shared = window(d(2034, 4, 1), d(2034, 4, 7));
            let a = handle_for(RwSignal::new(Some(shared.clone())));
            let b = handle_for(RwSignal::new(Some(shared.clone())));

            let (_, token) = a.issue(false).unwrap();
            assert!(b.issue(false).is_none());
            assert!(b.is_loading());

            assert_eq!(answer(&shared, token, Ok(slice(22.0))), 2);
            assert_eq!(a.data(), Some(slice(22.0)));
            assert_eq!(b.data(), Some(slice(22.0)));
        });
    }

    #[test]
    fn test_cache_is_shared_per_endpoint() {
        let a = shared_cache::<ReportQuery>();
        let b = shared_cache::<ReportQuery>();
        assert!(Rc::ptr_eq(&a, &b));

        let key = ReportQuery::Daily { date: None };
        a.borrow_mut().refetch(&key, Box::new(|_| {}));
        assert!(b.borrow().is_in_flight(&key));
        assert!(!shared_cache::<ConversionQuery>()
            .borrow()
            .is_in_flight(&ConversionQuery {
                start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            }));
    }
}

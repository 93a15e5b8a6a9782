//! Request cache keyed by query parameters.
//!
//! Synchronous state machine; time is passed in by the caller. The async
//! glue in [`super::hooks`] issues the requests it asks for and feeds the
//! results back through [`QueryCache::resolve`].

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};

use crate::shared::api::ApiError;

/// Callback of a requester waiting for the in-flight request of a key.
pub type Waiter<T> = Box<dyn FnOnce(Result<T, ApiError>)>;

struct Entry<T> {
    data: Option<T>,
    updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
    /// Token of the latest issued request, while it is pending
    in_flight: Option<u64>,
    waiters: Vec<Waiter<T>>,
}

impl<T> Entry<T> {
    fn new() -> Self {
        Self {
            data: None,
            updated_at: None,
            invalidated: false,
            in_flight: None,
            waiters: Vec::new(),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>, stale_time: Duration) -> bool {
        match (&self.data, self.updated_at) {
            (Some(_), Some(at)) => !self.invalidated && now - at < stale_time,
            _ => false,
        }
    }

    /// Nobody waits for it and its data is older than `max_age`.
    fn is_unused(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        if self.in_flight.is_some() || !self.waiters.is_empty() {
            return false;
        }
        match self.updated_at {
            Some(at) => now - at >= max_age,
            None => true,
        }
    }
}

/// Outcome of [`QueryCache::lookup`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Cache hit. The waiter was dropped, nothing to issue.
    Fresh(T),
    /// A request for the key is already pending; the waiter joined it.
    Joined { stale: Option<T> },
    /// The caller must send the request and resolve it with `token`.
    Issue { token: u64, stale: Option<T> },
}

/// Outcome of [`QueryCache::resolve`].
pub enum Resolution<T> {
    /// Token was superseded, the result is dropped.
    Discarded,
    /// Waiters to call once the cache borrow is released.
    Delivered(Vec<Waiter<T>>),
}

impl<T: Clone> Resolution<T> {
    /// Hand `result` to every waiter. Returns how many were called.
    pub fn deliver(self, result: &Result<T, ApiError>) -> usize {
        match self {
            Resolution::Discarded => 0,
            Resolution::Delivered(waiters) => {
                let count = waiters.len();
                for waiter in waiters {
                    waiter(result.clone());
                }
                count
            }
        }
    }
}

pub struct QueryCache<K, T> {
    entries: HashMap<K, Entry<T>>,
    next_token: u64,
}

impl<K, T> Default for QueryCache<K, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_token: 0,
        }
    }
}

impl<K: Eq + Hash + Clone, T: Clone> QueryCache<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Fresh value, or join/issue a request for `key`.
    pub fn lookup(
        &mut self,
        key: &K,
        now: DateTime<Utc>,
        stale_time: Duration,
        waiter: Waiter<T>,
    ) -> Lookup<T> {
        let token = self.next_token + 1;
        let entry = self.entries.entry(key.clone()).or_insert_with(Entry::new);

        if entry.is_fresh(now, stale_time) {
            if let Some(data) = &entry.data {
                return Lookup::Fresh(data.clone());
            }
        }

        let stale = entry.data.clone();
        entry.waiters.push(waiter);
        if entry.in_flight.is_some() {
            return Lookup::Joined { stale };
        }

        entry.in_flight = Some(token);
        self.next_token = token;
        Lookup::Issue { token, stale }
    }

    /// Issue a request for `key` even if one is pending. The pending one
    /// becomes stale and its result will be discarded; its waiters get the
    /// new result instead.
    pub fn refetch(&mut self, key: &K, waiter: Waiter<T>) -> u64 {
        let token = self.issue_token();
        let entry = self.entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.in_flight = Some(token);
        entry.waiters.push(waiter);
        token
    }

    /// Settle the request `token` of `key`.
    pub fn resolve(
        &mut self,
        key: &K,
        token: u64,
        result: &Result<T, ApiError>,
        now: DateTime<Utc>,
    ) -> Resolution<T> {
        let Some(entry) = self.entries.get_mut(key) else {
            return Resolution::Discarded;
        };
        if entry.in_flight != Some(token) {
            return Resolution::Discarded;
        }

        entry.in_flight = None;
        if let Ok(data) = result {
            entry.data = Some(data.clone());
            entry.updated_at = Some(now);
            entry.invalidated = false;
        }
        Resolution::Delivered(std::mem::take(&mut entry.waiters))
    }

    /// Mark `key` stale; the next lookup goes to the network.
    pub fn invalidate(&mut self, key: &K) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
        }
    }

    /// Drop idle entries older than `max_age`. Returns how many went.
    pub fn collect_garbage(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_unused(now, max_age));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peek(&self, key: &K) -> Option<&T> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    pub fn is_in_flight(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .map(|e| e.in_flight.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Cache = QueryCache<&'static str, u32>;
    type Log = Rc<RefCell<Vec<Result<u32, ApiError>>>>;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap()
    }

    fn stale() -> Duration {
        Duration::minutes(5)
    }

    fn recorder(log: &Log) -> Waiter<u32> {
        let log = log.clone();
        Box::new(move |result| log.borrow_mut().push(result))
    }

    fn noop() -> Waiter<u32> {
        Box::new(|_| {})
    }

    #[test]
    fn test_second_lookup_within_stale_time_is_hit() {
        let mut cache = Cache::new();
        let Lookup::Issue { token, stale: None } = cache.lookup(&"daily", t0(), stale(), noop())
        else {
            panic!("first lookup must issue");
        };
        cache.resolve(&"daily", token, &Ok(7), t0()).deliver(&Ok(7));

        let later = t0() + Duration::minutes(4);
        assert_eq!(cache.lookup(&"daily", later, stale(), noop()), Lookup::Fresh(7));
    }

    #[test]
    fn test_stale_entry_is_refreshed_and_still_shown() {
        let mut cache = Cache::new();
        let Lookup::Issue { token, .. } = cache.lookup(&"daily", t0(), stale(), noop()) else {
            panic!("first lookup must issue");
        };
        cache.resolve(&"daily", token, &Ok(7), t0());

        let later = t0() + Duration::minutes(5);
        match cache.lookup(&"daily", later, stale(), noop()) {
            Lookup::Issue { stale, .. } => assert_eq!(stale, Some(7)),
            other => panic!("expected refresh, got {:?}", other),
        }
    }

    #[test]
    fn test_concurrent_requesters_share_one_request() {
        let mut cache = Cache::new();
        let log: Log = Rc::default();

        let first = cache.lookup(&"daily", t0(), stale(), recorder(&log));
        let second = cache.lookup(&"daily", t0(), stale(), recorder(&log));
        let Lookup::Issue { token, .. } = first else {
            panic!("first lookup must issue");
        };
        assert_eq!(second, Lookup::Joined { stale: None });

        let result = Ok(42);
        let delivered = cache.resolve(&"daily", token, &result, t0()).deliver(&result);
        assert_eq!(delivered, 2);
        assert_eq!(*log.borrow(), vec![Ok(42), Ok(42)]);
        assert!(!cache.is_in_flight(&"daily"));
    }

    #[test]
    fn test_superseded_token_is_discarded() {
        let mut cache = Cache::new();
        let log: Log = Rc::default();

        let Lookup::Issue { token: slow, .. } =
            cache.lookup(&"daily", t0(), stale(), recorder(&log))
        else {
            panic!("first lookup must issue");
        };
        let fast = cache.refetch(&"daily", recorder(&log));
        assert!(fast > slow);

        // The later request answers first
        let newer = Ok(2);
        cache.resolve(&"daily", fast, &newer, t0()).deliver(&newer);
        let older = Ok(1);
        let late = cache.resolve(&"daily", slow, &older, t0());
        assert!(matches!(late, Resolution::Discarded));

        assert_eq!(cache.peek(&"daily"), Some(&2));
        assert_eq!(*log.borrow(), vec![Ok(2), Ok(2)]);
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut cache = Cache::new();
        let Lookup::Issue { token, .. } = cache.lookup(&"daily", t0(), stale(), noop()) else {
            panic!("first lookup must issue");
        };
        cache.resolve(&"daily", token, &Ok(5), t0());
        cache.invalidate(&"daily");

        let Lookup::Issue { token, stale } = cache.lookup(&"daily", t0(), stale(), noop()) else {
            panic!("invalidated entry must issue");
        };
        assert_eq!(stale, Some(5));
        let err = Err(ApiError::Network("offline".into()));
        cache.resolve(&"daily", token, &err, t0()).deliver(&err);
        assert_eq!(cache.peek(&"daily"), Some(&5));
    }

    #[test]
    fn test_invalidate_forces_network() {
        let mut cache = Cache::new();
        let Lookup::Issue { token, .. } = cache.lookup(&"weekly", t0(), stale(), noop()) else {
            panic!("first lookup must issue");
        };
        cache.resolve(&"weekly", token, &Ok(1), t0());
        cache.invalidate_all();
        assert!(matches!(
            cache.lookup(&"weekly", t0(), stale(), noop()),
            Lookup::Issue { .. }
        ));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = Cache::new();
        let a = cache.lookup(&"2024-05-01", t0(), stale(), noop());
        let b = cache.lookup(&"2024-05-02", t0(), stale(), noop());
        assert!(matches!(a, Lookup::Issue { token: 1, .. }));
        assert!(matches!(b, Lookup::Issue { token: 2, .. }));
    }

    #[test]
    fn test_garbage_collection_keeps_pending_and_recent() {
        let mut cache = Cache::new();
        let gc = Duration::minutes(30);
        for (key, at) in [("old", t0()), ("recent", t0() + Duration::minutes(20))] {
            let Lookup::Issue { token, .. } = cache.lookup(&key, at, stale(), noop()) else {
                panic!("first lookup must issue");
            };
            cache.resolve(&key, token, &Ok(1), at);
        }
        cache.lookup(&"pending", t0(), stale(), noop());
        assert_eq!(cache.len(), 3);

        let now = t0() + Duration::minutes(40);
        assert_eq!(cache.collect_garbage(now, gc), 1);
        assert_eq!(cache.peek(&"old"), None);
        assert_eq!(cache.peek(&"recent"), Some(&1));
        assert!(cache.is_in_flight(&"pending"));

        // A dropped key starts over
        assert!(matches!(
            cache.lookup(&"old", now, stale(), noop()),
            Lookup::Issue { stale: None, .. }
        ));
    }

    #[test]
    fn test_failed_entry_without_data_is_collected() {
        let mut cache = Cache::new();
        let Lookup::Issue { token, .. } = cache.lookup(&"daily", t0(), stale(), noop()) else {
            panic!("first lookup must issue");
        };
        let err = Err(ApiError::Timeout { after_ms: 30_000 });
        cache.resolve(&"daily", token, &err, t0()).deliver(&err);
        assert_eq!(cache.collect_garbage(t0(), Duration::minutes(30)), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_resolve_unknown_key() {
        let mut cache = Cache::new();
        assert!(matches!(
            cache.resolve(&"monthly", 1, &Ok(1), t0()),
            Resolution::Discarded
        ));
    }
}

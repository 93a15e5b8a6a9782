use chrono::Duration;

/// Cache and retry policy of a query hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Age after which a cached result is refreshed in the background
    pub stale_time: Duration,
    /// Age after which an unused cached result is dropped
    pub gc_time: Duration,
    /// Retries of transport failures before the error is shown
    pub retry: u32,
    pub refetch_on_focus: bool,
    /// `false` keeps the hook idle
    pub enabled: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::minutes(5),
            gc_time: Duration::minutes(30),
            retry: 1,
            refetch_on_focus: false,
            enabled: true,
        }
    }
}

impl QueryOptions {
    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }

    pub fn refetch_on_focus(mut self, on: bool) -> Self {
        self.refetch_on_focus = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = QueryOptions::default();
        assert_eq!(options.stale_time, Duration::minutes(5));
        assert!(options.gc_time > options.stale_time);
        assert_eq!(options.retry, 1);
        assert!(!options.refetch_on_focus);
        assert!(options.enabled);
    }

    #[test]
    fn test_builders() {
        let options = QueryOptions::default()
            .with_retry(3)
            .with_stale_time(Duration::seconds(10))
            .with_gc_time(Duration::minutes(1))
            .refetch_on_focus(true);
        assert_eq!(options.retry, 3);
        assert_eq!(options.stale_time, Duration::seconds(10));
        assert_eq!(options.gc_time, Duration::minutes(1));
        assert!(options.refetch_on_focus);
    }
}

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Keys with no hits inside the window are swept once the table grows past this size.
const PRUNE_THRESHOLD: usize = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: usize,
    pub remaining: usize,
    /// Time until the oldest hit inside the window expires.
    pub reset_after: Duration,
}

/// Allows at most `max_requests` hits per key within any `window`-long interval.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    hits: HashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: HashMap::new(),
        }
    }

    /// Records a hit for `key` if it is allowed. Rejected hits are not recorded.
    pub fn check(&mut self, key: &str, now: Instant) -> RateLimitDecision {
        if self.hits.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }
        let window = self.window;
        let hits = self.hits.entry(key.to_string()).or_default();
        while hits
            .front()
            .is_some_and(|hit| now.saturating_duration_since(*hit) >= window)
        {
            hits.pop_front();
        }
        let allowed = hits.len() < self.max_requests;
        if allowed {
            hits.push_back(now);
        }
        let reset_after = hits
            .front()
            .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
            .unwrap_or(Duration::ZERO);
        RateLimitDecision {
            allowed,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(hits.len()),
            reset_after,
        }
    }

    fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.hits.retain(|_key, hits| {
            hits.back()
                .is_some_and(|latest| now.saturating_duration_since(*latest) < window)
        });
    }
}

/// Origin check plus per-client rate limit in front of the imagery routes.
#[derive(Clone, Debug)]
pub struct ImageryGuard {
    pub allowed_origin: Option<String>,
    limiter: Arc<Mutex<SlidingWindowLimiter>>,
}

impl ImageryGuard {
    pub fn new(allowed_origin: Option<String>, max_requests: usize, window: Duration) -> Self {
        Self {
            allowed_origin,
            limiter: Arc::new(Mutex::new(SlidingWindowLimiter::new(max_requests, window))),
        }
    }

    /// A request without an `Origin` header is let through: only cross-origin browser
    /// requests carry one.
    pub fn origin_allowed(&self, origin: Option<&str>) -> bool {
        match (&self.allowed_origin, origin) {
            (Some(allowed), Some(origin)) => allowed == origin,
            _ => true,
        }
    }

    pub async fn check(&self, client_key: &str) -> RateLimitDecision {
        self.limiter
            .lock()
            .await
            .check(&format!("imagery:{client_key}"), Instant::now())
    }
}

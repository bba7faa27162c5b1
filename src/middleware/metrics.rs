use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::{Middleware, Next};
use crate::error::ServerError;
use crate::server::{Request, Response};

/// Request-count and latency middleware.
///
/// All counters use atomic operations for thread-safe updates without locks,
/// so one instance can be shared across every transport thread driving the
/// same dispatcher. Failed dispatches count toward both totals; latency covers
/// everything nested inside this middleware.
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    total_latency_ns: AtomicU64,
}

impl Default for MetricsMiddleware {
    fn default() -> Self {
        Self {
            request_count: AtomicUsize::new(0),
            total_latency_ns: AtomicU64::new(0),
        }
    }
}

impl MetricsMiddleware {
    /// Create a metrics middleware with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of requests that passed through this middleware.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Mean latency across all observed requests; zero when none were seen.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }
}

impl Middleware for MetricsMiddleware {
    fn handle(&self, req: &mut Request, next: Next<'_>) -> Result<Response, ServerError> {
        let start = std::time::Instant::now();
        let result = next.run(req);

        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ns
            .fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);

        result
    }
}

use tracing::{info, info_span, warn};

use super::{Middleware, Next};
use crate::error::ServerError;
use crate::server::{Request, Response};

/// Wraps the rest of the chain in a per-request `tracing` span and records
/// the outcome on the way out.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn handle(&self, req: &mut Request, next: Next<'_>) -> Result<Response, ServerError> {
        let span = info_span!("request", method = %req.method, path = %req.path);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = next.run(req);
        let latency_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(resp) => info!(
                status = resp.status.as_u16(),
                latency_ms = latency_ms,
                "Request complete"
            ),
            Err(err) => warn!(error = %err, latency_ms = latency_ms, "Request failed"),
        }

        result
    }
}

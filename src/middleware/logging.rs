use super::{Middleware, Next};
use crate::error::RouterError;
use crate::request::Request;
use crate::response::Response;
use std::time::Instant;
use tracing::{error, info};

/// Logs one event per request with status and latency.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn process(
        &self,
        req: &Request,
        res: Response,
        next: Next<'_>,
    ) -> Result<Response, RouterError> {
        let start = Instant::now();
        let result = next.run(req, res);
        let latency_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(res) => info!(
                method = %req.method(),
                path = %req.path(),
                status = res.status(),
                latency_ms = latency_ms,
                "request complete"
            ),
            Err(err) => error!(
                method = %req.method(),
                path = %req.path(),
                latency_ms = latency_ms,
                error = %err,
                "request failed"
            ),
        }
        result
    }
}

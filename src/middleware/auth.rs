use super::{Middleware, Next};
use crate::error::RouterError;
use crate::request::Request;
use crate::response::Response;
use tracing::warn;

/// Gate that requires an exact `Authorization` header value.
///
/// Requests without the expected token get a 401 and the inner chain
/// never runs.
pub struct BearerAuthMiddleware {
    token: String,
}

impl BearerAuthMiddleware {
    /// Expect the given `Authorization` header value.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Middleware for BearerAuthMiddleware {
    fn process(
        &self,
        req: &Request,
        res: Response,
        next: Next<'_>,
    ) -> Result<Response, RouterError> {
        let authorized = req
            .header("authorization")
            .is_some_and(|h| h == self.token);
        if authorized {
            next.run(req, res)
        } else {
            warn!(path = %req.path(), "request rejected by auth middleware");
            Response::json_with_status(401, &serde_json::json!({ "error": "Unauthorized" }))
        }
    }
}

//! Immutable request snapshot handed to the dispatch pipeline.
//!
//! The router never parses a transport itself: the request source
//! (an HTTP server, a test harness) materializes a [`Request`] through
//! [`RequestBuilder`] with the method, path (query string already
//! stripped), headers, query parameters, form fields and raw body.
//!
//! The single exception to immutability is the path-parameter field,
//! which the router binds once after a route has matched.

use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of path/query parameters before heap allocation.
/// Most routes have well under 8 placeholders.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch hot path.
///
/// Names use `Arc<str>` because they come from the compiled route table
/// and are shared per dispatch; values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Parse a method name case-insensitively.
///
/// `"get"`, `"Get"` and `"GET"` all yield [`Method::GET`], so method
/// comparison during matching is a plain equality check with no repeated
/// normalization.
pub fn parse_method(name: &str) -> Result<Method, http::method::InvalidMethod> {
    Method::from_bytes(name.to_ascii_uppercase().as_bytes())
}

/// Immutable snapshot of one incoming call.
///
/// Constructed by the request source via [`Request::builder`]; path
/// parameters stay empty until the router has matched a route and bound
/// them, which happens at most once per dispatch.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderVec,
    query_params: ParamVec,
    form_params: ParamVec,
    body: String,
    path_params: ParamVec,
    params_bound: bool,
}

impl Request {
    /// Start building a request from the pre-parsed transport data.
    #[must_use]
    pub fn builder(method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            method,
            path: path.into(),
            headers: HeaderVec::new(),
            query_params: ParamVec::new(),
            form_params: ParamVec::new(),
            body: String::new(),
        }
    }

    /// HTTP method of the call.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Get a header by name (case-insensitive, per HTTP convention).
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name.
    ///
    /// Uses "last write wins" semantics: for `?limit=10&limit=20` the
    /// last occurrence is returned.
    #[inline]
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a form body field by name (last write wins).
    #[inline]
    #[must_use]
    pub fn form(&self, name: &str) -> Option<&str> {
        self.form_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a path parameter by name.
    ///
    /// Empty until a route has matched. Uses "last write wins" semantics
    /// for duplicate placeholder names at different path depths.
    #[inline]
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Raw request body.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// All headers in transport order.
    #[must_use]
    pub fn headers(&self) -> &HeaderVec {
        &self.headers
    }

    /// All query parameters in transport order.
    #[must_use]
    pub fn query_params(&self) -> &ParamVec {
        &self.query_params
    }

    /// All form body fields in transport order.
    #[must_use]
    pub fn form_params(&self) -> &ParamVec {
        &self.form_params
    }

    /// Path parameters bound by the matched route.
    #[must_use]
    pub fn path_params(&self) -> &ParamVec {
        &self.path_params
    }

    /// Convert path params to a `HashMap`.
    /// Note: this allocates; prefer [`Request::path_param`] in hot paths.
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Bind the parameters extracted by the matched route.
    ///
    /// Called once by the router after resolution. A second bind in the
    /// same dispatch is a router bug; it is ignored in release builds.
    pub(crate) fn bind_path_params(&mut self, params: ParamVec) {
        debug_assert!(
            !self.params_bound,
            "path parameters bound twice in one dispatch"
        );
        if self.params_bound {
            return;
        }
        self.path_params = params;
        self.params_bound = true;
    }
}

/// Builder the request source fills with pre-parsed transport data.
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    path: String,
    headers: HeaderVec,
    query_params: ParamVec,
    form_params: ParamVec,
    body: String,
}

impl RequestBuilder {
    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((Arc::from(name), value.into()));
        self
    }

    /// Append a form body field.
    #[must_use]
    pub fn form(mut self, name: &str, value: impl Into<String>) -> Self {
        self.form_params.push((Arc::from(name), value.into()));
        self
    }

    /// Set the raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Finish the snapshot.
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            path: self.path,
            headers: self.headers,
            query_params: self.query_params,
            form_params: self.form_params,
            body: self.body,
            path_params: ParamVec::new(),
            params_bound: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_case_insensitive() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Post").unwrap(), Method::POST);
        assert_eq!(parse_method("DELETE").unwrap(), Method::DELETE);
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let req = Request::builder(Method::GET, "/")
            .header("Content-Type", "text/plain")
            .build();
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn test_query_last_write_wins() {
        let req = Request::builder(Method::GET, "/")
            .query("limit", "10")
            .query("limit", "20")
            .build();
        assert_eq!(req.query("limit"), Some("20"));
    }

    #[test]
    fn test_path_params_empty_until_bound() {
        let mut req = Request::builder(Method::GET, "/users/42").build();
        assert!(req.path_params().is_empty());
        let mut params = ParamVec::new();
        params.push((Arc::from("id"), "42".to_string()));
        req.bind_path_params(params);
        assert_eq!(req.path_param("id"), Some("42"));
    }
}

//! Response builder and emission seam.
//!
//! A [`Response`] is built up by the handler chain and consumed exactly
//! once by a [`ResponseSink`], the collaborator that owns the wire. The
//! router is the only caller of [`ResponseSink::emit`] and calls it once
//! per dispatch, so a sink never sees a double emission.

use crate::error::RouterError;
use crate::request::HeaderVec;
use serde::Serialize;
use std::sync::Arc;

/// Reason phrase for the status codes this crate produces itself.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Mutable builder for one outgoing call.
///
/// Defaults to status 200 with no headers and an empty body. Setters
/// return `&mut Self` so handlers can chain them:
///
/// ```
/// use microrouter::Response;
///
/// let mut res = Response::new();
/// res.set_status(201).set_header("Location", "/users/7");
/// assert_eq!(res.status(), 201);
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderVec,
    body: Vec<u8>,
    terminal: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Fresh response: status 200, no headers, empty body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HeaderVec::new(),
            body: Vec::new(),
            terminal: false,
        }
    }

    /// Plain-text response with the given status.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        let mut res = Self::new();
        res.set_status(status)
            .set_header("Content-Type", "text/plain")
            .set_body(body.into().into_bytes());
        res
    }

    /// JSON response: status 200, `Content-Type: application/json`,
    /// body serialized from `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, RouterError> {
        Self::json_with_status(200, value)
    }

    /// JSON response with an explicit status code.
    pub fn json_with_status<T: Serialize>(status: u16, value: &T) -> Result<Self, RouterError> {
        let body = serde_json::to_vec(value)?;
        let mut res = Self::new();
        res.set_status(status)
            .set_header("Content-Type", "application/json")
            .set_body(body);
        Ok(res)
    }

    /// Plain-text diagnostic response, used at the dispatch error boundary.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::text(status, message)
    }

    /// Redirect with status 302.
    ///
    /// The returned response is terminal: after the router emits it, the
    /// dispatch reports [`Halted`](crate::router::DispatchOutcome::Halted)
    /// and no further work happens. Callers must treat it as the end of
    /// the request, the moral equivalent of a process exit after the
    /// redirect is on the wire.
    #[must_use]
    pub fn redirect(location: &str) -> Self {
        Self::redirect_with_status(location, 302)
    }

    /// Redirect with an explicit status code (301, 302, 303, 307, 308).
    #[must_use]
    pub fn redirect_with_status(location: &str, status: u16) -> Self {
        let mut res = Self::new();
        res.set_status(status).set_header("Location", location);
        res.terminal = true;
        res
    }

    /// Set the status code.
    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    /// Add or replace a header (last write wins per name,
    /// case-insensitive).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Set the body.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Current status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get a header by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderVec {
        &self.headers
    }

    /// Current body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether this response ends the request outright (redirects).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// Collaborator that transmits the final response.
///
/// The router calls [`emit`](ResponseSink::emit) exactly once per
/// dispatch, pass or fail.
pub trait ResponseSink {
    /// Write the final status, headers and body to the wire.
    fn emit(&mut self, status: u16, headers: &HeaderVec, body: &[u8]);
}

/// One observed emission.
#[derive(Debug, Clone)]
pub struct Emission {
    /// Emitted status code
    pub status: u16,
    /// Emitted headers, in emission order
    pub headers: HeaderVec,
    /// Emitted body bytes
    pub body: Vec<u8>,
}

impl Emission {
    /// Get an emitted header by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Emitted body as UTF-8 text (lossy).
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// In-memory sink that records every emission.
///
/// Used by tests and embedders to observe what hit the wire, including
/// the exactly-one-emission guarantee.
#[derive(Debug, Default)]
pub struct CapturedResponse {
    emissions: Vec<Emission>,
}

impl CapturedResponse {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far.
    #[must_use]
    pub fn emissions(&self) -> &[Emission] {
        &self.emissions
    }

    /// The single emission of a completed dispatch.
    ///
    /// Returns `None` unless exactly one emission was recorded.
    #[must_use]
    pub fn single(&self) -> Option<&Emission> {
        match self.emissions.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl ResponseSink for CapturedResponse {
    fn emit(&mut self, status: u16, headers: &HeaderVec, body: &[u8]) {
        self.emissions.push(Emission {
            status,
            headers: headers.clone(),
            body: body.to_vec(),
        });
    }
}

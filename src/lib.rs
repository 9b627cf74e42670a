//! # microrouter
//!
//! A minimal, middleware-aware HTTP request router: it maps an incoming
//! method+path pair to a registered handler, extracts `{name}` path
//! parameters, applies a chain of middleware around the handler, and
//! produces exactly one emitted response per dispatch.
//!
//! ## Architecture
//!
//! - **[`request`]** - immutable request snapshot supplied by the
//!   transport collaborator, plus inline parameter/header storage
//! - **[`response`]** - response builder, JSON/redirect conveniences, and
//!   the [`ResponseSink`] emission seam
//! - **[`router`]** - route compilation, ordered first-match resolution,
//!   and the dispatch pipeline
//! - **[`middleware`]** - the [`Middleware`] trait with its [`Next`]
//!   continuation, plus shipped auth and logging middleware
//! - **[`registry`]** - controller factories for the
//!   `(controller, action)` handler shape, with shared-context threading
//! - **[`error`]** - the crate's single error type, rendered as a 500 at
//!   the dispatch boundary
//!
//! ## Request flow
//!
//! 1. The request source materializes a [`Request`] (method, path,
//!    headers, query, form, body) - the router never parses a transport.
//! 2. [`Router::dispatch`] scans routes in registration order and stops
//!    at the first whose method-set and anchored pattern both match.
//! 3. Path parameters are extracted and bound onto the request, once.
//! 4. The route's middleware wraps the handler, first-added outermost;
//!    any middleware may skip [`Next::run`] and short-circuit the rest.
//! 5. The chain's response is emitted through the [`ResponseSink`]
//!    exactly once; errors and panics become a 500 with the message as
//!    body, and a missing route becomes the configured not-found
//!    response or a plain 404.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use microrouter::{CapturedResponse, DispatchOutcome, Handler, Request, Response, Router};
//!
//! let mut router = Router::new();
//! router.group("/api", |api| {
//!     api.get("/pets/{id}", Handler::direct(|req, _res| {
//!         Response::json(&serde_json::json!({ "id": req.path_param("id") }))
//!     }));
//! });
//!
//! let mut req = Request::builder(Method::GET, "/api/pets/7").build();
//! let mut sink = CapturedResponse::new();
//! let outcome = router.dispatch(&mut req, &mut sink);
//! assert_eq!(outcome, DispatchOutcome::Completed);
//! assert_eq!(sink.single().unwrap().status, 200);
//! ```
//!
//! ## Concurrency
//!
//! Register-then-serve: the route table is read-only after registration
//! and `dispatch` takes `&self`, so a configured router can be shared
//! across worker threads without locks. One dispatch runs to completion
//! per request; there is no mid-chain abort beyond a middleware choosing
//! not to call its continuation.

pub mod error;
pub mod middleware;
pub mod registry;
pub mod request;
pub mod response;
pub mod router;

pub use error::RouterError;
pub use middleware::{BearerAuthMiddleware, LoggingMiddleware, Middleware, Next};
pub use registry::{Controller, ControllerRegistry, Handler, SharedContext};
pub use request::{
    parse_method, HeaderVec, ParamVec, Request, RequestBuilder, MAX_INLINE_HEADERS,
    MAX_INLINE_PARAMS,
};
pub use response::{status_reason, CapturedResponse, Emission, Response, ResponseSink};
pub use router::{DispatchOutcome, Route, Router};

//! # Router Module
//!
//! Route compilation and request dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling `{name}` path templates into anchored matchers at
//!   registration time
//! - Matching incoming requests against the route table in registration
//!   order (first match wins)
//! - Extracting path parameters from matched routes
//! - Composing each route's middleware around its handler and running
//!   the chain to a single emitted response
//!
//! ## Architecture
//!
//! Two phases:
//!
//! 1. **Registration**: `get`/`post`/`match_methods`/`group` build an
//!    ordered table of [`Route`]s, each with a compiled pattern, handler
//!    and middleware list. Registration finishes before serving starts.
//!
//! 2. **Dispatch**: for each request, [`Router::dispatch`] scans the
//!    table for the first match, binds path parameters, runs the chain
//!    behind an error boundary, and emits exactly one response.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use microrouter::{CapturedResponse, Handler, Request, Response, Router};
//!
//! let mut router = Router::new();
//! router.get("/users/{id}", Handler::direct(|req, _res| {
//!     let id = req.path_param("id").unwrap_or("?");
//!     Ok(Response::text(200, format!("user {id}")))
//! }));
//!
//! let mut req = Request::builder(Method::GET, "/users/42").build();
//! let mut sink = CapturedResponse::new();
//! router.dispatch(&mut req, &mut sink);
//! assert_eq!(sink.single().unwrap().body_text(), "user 42");
//! ```

mod core;
mod route;
#[cfg(test)]
mod tests;

pub use core::{DispatchOutcome, Router};
pub use route::Route;

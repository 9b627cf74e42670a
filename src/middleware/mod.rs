//! # Middleware Module
//!
//! Pluggable units wrapped around a route's handler. Each middleware
//! receives the request, the response built so far, and a [`Next`]
//! continuation; it may inspect the request, rewrite the response, and
//! decide whether to run the rest of the chain at all.
//!
//! Middleware conformance is a compile-time property of the
//! [`Middleware`] trait, so a route can never be configured with an
//! invalid middleware.

mod auth;
mod core;
mod logging;

pub use auth::BearerAuthMiddleware;
pub use core::{Middleware, Next};
pub use logging::LoggingMiddleware;

use super::route::Route;
use crate::error::RouterError;
use crate::middleware::Next;
use crate::registry::{Controller, ControllerRegistry, Handler, HandlerFn, SharedContext};
use crate::request::Request;
use crate::response::{Response, ResponseSink};
use http::Method;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The response was emitted; the request source may continue.
    Completed,
    /// A terminal response (redirect) was emitted; no further work may
    /// happen for this request.
    Halted,
}

/// Ordered collection of routes plus the dispatch pipeline.
///
/// Registration order is match-priority order: dispatch always picks the
/// *first* registered route whose method-set and path both match, with no
/// notion of specificity beyond that. Registration is expected to finish
/// before serving starts; `dispatch` takes `&self` and never mutates the
/// route table, so a registered router can be shared across workers
/// without locks.
pub struct Router {
    routes: Vec<Route>,
    base_path: String,
    not_found: Option<Arc<HandlerFn>>,
    registry: ControllerRegistry,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with an empty base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("")
    }

    /// Router whose routes are all prefixed with `base_path`
    /// (trailing `/` trimmed).
    #[must_use]
    pub fn with_base_path(base_path: &str) -> Self {
        Self {
            routes: Vec::new(),
            base_path: base_path.trim_end_matches('/').to_string(),
            not_found: None,
            registry: ControllerRegistry::new(),
        }
    }

    /// Register a GET route.
    pub fn get(&mut self, path: &str, handler: Handler) -> &mut Route {
        self.add_route(Method::GET, path, handler)
    }

    /// Register a POST route.
    pub fn post(&mut self, path: &str, handler: Handler) -> &mut Route {
        self.add_route(Method::POST, path, handler)
    }

    /// Register a PUT route.
    pub fn put(&mut self, path: &str, handler: Handler) -> &mut Route {
        self.add_route(Method::PUT, path, handler)
    }

    /// Register a DELETE route.
    pub fn delete(&mut self, path: &str, handler: Handler) -> &mut Route {
        self.add_route(Method::DELETE, path, handler)
    }

    /// Register a route for a single method.
    ///
    /// The path is prefixed with the current base path. Returns the new
    /// route so middleware can be chained onto it.
    pub fn add_route(&mut self, method: Method, path: &str, handler: Handler) -> &mut Route {
        self.register(vec![method], path, handler)
    }

    /// Register one route accepting several methods.
    pub fn match_methods(&mut self, methods: &[Method], path: &str, handler: Handler) -> &mut Route {
        self.register(methods.to_vec(), path, handler)
    }

    fn register(&mut self, methods: Vec<Method>, path: &str, handler: Handler) -> &mut Route {
        let template = format!("{}{}", self.base_path, path);
        info!(methods = ?methods, template = %template, "route registered");
        self.routes.push(Route::new(methods, &template, handler));
        let last = self.routes.len() - 1;
        &mut self.routes[last]
    }

    /// Extend the base path by `prefix` for the duration of `f`.
    ///
    /// Nested registrations inherit the extended prefix; groups nest to
    /// any depth and the prior base path is restored when `f` returns.
    pub fn group<F>(&mut self, prefix: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Router),
    {
        let prior_len = self.base_path.len();
        self.base_path.push_str(prefix.trim_end_matches('/'));
        f(self);
        self.base_path.truncate(prior_len);
        self
    }

    /// Fallback invoked when no route matches.
    pub fn set_not_found_handler<F>(&mut self, handler: F)
    where
        F: Fn(&Request, Response) -> Result<Response, RouterError> + Send + Sync + 'static,
    {
        self.not_found = Some(Arc::new(handler));
    }

    /// Shared context (e.g. a template engine) forwarded into controller
    /// factories.
    pub fn set_context(&mut self, context: Arc<dyn Any + Send + Sync>) {
        self.registry.set_context(context);
    }

    /// Register a controller factory for the `Bound` handler shape.
    pub fn register_controller<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(SharedContext) -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.registry.register(name, factory);
    }

    /// Registered routes in priority order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve the request to a route, run the middleware-wrapped handler
    /// chain, and emit the response through `sink` exactly once.
    ///
    /// Any error or panic inside the chain is caught here and rendered as
    /// a 500 response carrying the error's message; a failed dispatch
    /// still terminates with a single emission.
    pub fn dispatch(&self, req: &mut Request, sink: &mut dyn ResponseSink) -> DispatchOutcome {
        debug!(method = %req.method(), path = %req.path(), "route match attempt");
        let match_start = Instant::now();

        let matched = self
            .routes
            .iter()
            .find(|route| route.matches(req.path(), req.method()));

        let response = match matched {
            Some(route) => {
                let params = route.extract_params(req.path());
                info!(
                    method = %req.method(),
                    path = %req.path(),
                    template = %route.template(),
                    path_params = ?params,
                    duration_us = match_start.elapsed().as_micros() as u64,
                    "route matched"
                );
                req.bind_path_params(params);
                self.run_chain(route, req).unwrap_or_else(|err| {
                    error!(
                        method = %req.method(),
                        path = %req.path(),
                        error = %err,
                        "dispatch failed"
                    );
                    Response::error(500, &format!("Internal error: {err}"))
                })
            }
            None => {
                warn!(
                    method = %req.method(),
                    path = %req.path(),
                    duration_us = match_start.elapsed().as_micros() as u64,
                    "no route matched"
                );
                self.run_not_found(req)
            }
        };

        let halted = response.is_terminal();
        sink.emit(response.status(), response.headers(), response.body());
        if halted {
            DispatchOutcome::Halted
        } else {
            DispatchOutcome::Completed
        }
    }

    /// Fold the route's middleware around its handler and run the chain,
    /// converting panics into errors.
    fn run_chain(&self, route: &Route, req: &Request) -> Result<Response, RouterError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            Next::new(route.middlewares(), route.handler(), &self.registry)
                .run(req, Response::new())
        }));
        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                Err(RouterError::Handler(format!("handler panicked: {message}")))
            }
        }
    }

    fn run_not_found(&self, req: &Request) -> Response {
        match &self.not_found {
            Some(handler) => handler(req, Response::new()).unwrap_or_else(|err| {
                error!(path = %req.path(), error = %err, "not-found handler failed");
                Response::error(500, &format!("Internal error: {err}"))
            }),
            None => Response::text(404, "404 - Not Found"),
        }
    }
}

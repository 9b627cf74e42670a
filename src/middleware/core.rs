use crate::error::RouterError;
use crate::registry::{ControllerRegistry, Handler};
use crate::request::Request;
use crate::response::Response;
use std::sync::Arc;

/// A unit wrapped around a route's handler.
///
/// Middleware runs in the order it was added to the route: the first
/// added is outermost and decides whether and when the rest of the chain
/// runs. Not calling [`Next::run`] short-circuits every inner middleware
/// and the handler, which is the gating mechanism for auth/validation.
pub trait Middleware: Send + Sync {
    /// Process the request, choosing whether to continue the chain.
    fn process(
        &self,
        req: &Request,
        res: Response,
        next: Next<'_>,
    ) -> Result<Response, RouterError>;
}

/// Continuation over the remaining middleware and the base handler.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middlewares: &'a [Arc<dyn Middleware>],
    handler: &'a Handler,
    registry: &'a ControllerRegistry,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        middlewares: &'a [Arc<dyn Middleware>],
        handler: &'a Handler,
        registry: &'a ControllerRegistry,
    ) -> Self {
        Self {
            middlewares,
            handler,
            registry,
        }
    }

    /// Run the next middleware, or the base handler if none remain.
    pub fn run(self, req: &Request, res: Response) -> Result<Response, RouterError> {
        match self.middlewares.split_first() {
            Some((mw, rest)) => mw.process(
                req,
                res,
                Next {
                    middlewares: rest,
                    ..self
                },
            ),
            None => self.registry.invoke(self.handler, req, res),
        }
    }
}

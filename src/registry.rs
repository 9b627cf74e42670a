//! Handler shapes and the controller registry.
//!
//! A route's handler is either a bare function or a `(controller,
//! action)` pair. The pair shape is resolved through a capability lookup:
//! the host registers controller factories by name, and the router
//! instantiates the controller at dispatch time, threading its shared
//! context (e.g. a template engine) into the factory. This keeps the
//! router decoupled from any particular object-construction mechanism.

use crate::error::RouterError;
use crate::request::Request;
use crate::response::Response;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Bare handler function: `(request, response) -> response`.
pub type HandlerFn = dyn Fn(&Request, Response) -> Result<Response, RouterError> + Send + Sync;

/// Opaque shared context forwarded into controller factories.
///
/// Typically a template/view engine. The router never looks inside it;
/// controllers downcast to the concrete type they were built for.
pub type SharedContext = Option<Arc<dyn Any + Send + Sync>>;

/// The two handler shapes a route can carry.
#[derive(Clone)]
pub enum Handler {
    /// A free function invoked directly with `(request, response)`.
    Direct(Arc<HandlerFn>),
    /// A controller name + action name, resolved through the
    /// [`ControllerRegistry`] at dispatch time.
    Bound {
        /// Registered controller name
        controller: String,
        /// Action method to invoke on the instantiated controller
        action: String,
    },
}

impl Handler {
    /// Wrap a bare function.
    pub fn direct<F>(f: F) -> Self
    where
        F: Fn(&Request, Response) -> Result<Response, RouterError> + Send + Sync + 'static,
    {
        Handler::Direct(Arc::new(f))
    }

    /// Reference a registered controller by name plus an action.
    pub fn bound(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Handler::Bound {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handler::Direct(_) => f.write_str("Handler::Direct"),
            Handler::Bound { controller, action } => f
                .debug_struct("Handler::Bound")
                .field("controller", controller)
                .field("action", action)
                .finish(),
        }
    }
}

/// A controller instance produced by a registered factory.
///
/// `call` dispatches on the action name the route was registered with and
/// must return [`RouterError::UnknownAction`] for names it does not
/// recognize:
///
/// ```
/// use microrouter::{Controller, Request, Response, RouterError};
///
/// struct UserController;
///
/// impl Controller for UserController {
///     fn call(&self, action: &str, req: &Request, res: Response)
///         -> Result<Response, RouterError>
///     {
///         match action {
///             "show" => Ok(Response::text(200, "user page")),
///             _ => Err(RouterError::UnknownAction {
///                 controller: "UserController".to_string(),
///                 action: action.to_string(),
///             }),
///         }
///     }
/// }
/// # let _ = UserController.call("show", &Request::builder(http::Method::GET, "/").build(), Response::new());
/// ```
pub trait Controller {
    /// Invoke the named action with `(request, response)`.
    fn call(&self, action: &str, req: &Request, res: Response) -> Result<Response, RouterError>;
}

/// Factory that builds a controller, receiving the router's shared context.
pub type ControllerFactory = dyn Fn(SharedContext) -> Box<dyn Controller> + Send + Sync;

/// Name → factory lookup for the `Bound` handler shape.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, Arc<ControllerFactory>>,
    context: SharedContext,
}

impl ControllerRegistry {
    /// Empty registry with no shared context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shared context forwarded to every factory.
    pub fn set_context(&mut self, context: Arc<dyn Any + Send + Sync>) {
        self.context = Some(context);
    }

    /// Register a controller factory under a name.
    ///
    /// Replaces any factory previously registered under the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(SharedContext) -> Box<dyn Controller> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(controller = %name, "controller registered");
        self.factories.insert(name, Arc::new(factory));
    }

    /// Resolve and invoke a handler with `(request, response)`.
    pub(crate) fn invoke(
        &self,
        handler: &Handler,
        req: &Request,
        res: Response,
    ) -> Result<Response, RouterError> {
        match handler {
            Handler::Direct(f) => f(req, res),
            Handler::Bound { controller, action } => {
                let factory =
                    self.factories
                        .get(controller)
                        .ok_or_else(|| RouterError::UnknownController {
                            name: controller.clone(),
                        })?;
                let instance = factory(self.context.clone());
                instance.call(action, req, res)
            }
        }
    }
}

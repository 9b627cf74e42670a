use std::fmt;

/// Error raised while resolving or running a dispatch chain.
///
/// Every variant is caught once at the dispatch boundary and rendered as a
/// 500 response carrying the error's message. There are no retries and no
/// partial responses.
#[derive(Debug)]
pub enum RouterError {
    /// The route's handler names a controller that was never registered.
    UnknownController {
        /// The controller name the route asked for
        name: String,
    },
    /// The controller exists but does not expose the requested action.
    UnknownAction {
        /// The controller name
        controller: String,
        /// The action name the route asked for
        action: String,
    },
    /// A handler or middleware failed (including a caught panic).
    Handler(String),
    /// Serializing a JSON response body failed.
    Serialization(serde_json::Error),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnknownController { name } => {
                write!(f, "no controller registered under '{}'", name)
            }
            RouterError::UnknownAction { controller, action } => {
                write!(f, "controller '{}' has no action '{}'", controller, action)
            }
            RouterError::Handler(msg) => write!(f, "{}", msg),
            RouterError::Serialization(err) => {
                write!(f, "failed to serialize response body: {}", err)
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::Serialization(err)
    }
}

use crate::middleware::Middleware;
use crate::registry::Handler;
use crate::request::ParamVec;
use http::Method;
use regex::Regex;
use std::sync::Arc;

/// A compiled matcher for one method-set + path template + handler.
///
/// The template is parsed once at registration: each `{name}` token
/// (name = `[a-zA-Z0-9_]+`) becomes a single-segment capture `([^/]+)`
/// and its name is recorded in appearance order. The same pass produces
/// both, so placeholder names and capture groups cannot drift apart.
pub struct Route {
    methods: Vec<Method>,
    template: String,
    pattern: Regex,
    param_names: Vec<String>,
    handler: Handler,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Route {
    pub(crate) fn new(methods: Vec<Method>, template: &str, handler: Handler) -> Self {
        let (pattern, param_names) = Self::compile(template);
        Self {
            methods,
            template: template.to_string(),
            pattern,
            param_names,
            handler,
            middlewares: Vec::new(),
        }
    }

    /// Compile a path template into an anchored regex plus the ordered
    /// placeholder names.
    ///
    /// Literal stretches are regex-escaped so metacharacters in a path
    /// match themselves. A `{` that does not open a valid identifier
    /// token is treated as a literal.
    pub(crate) fn compile(template: &str) -> (Regex, Vec<String>) {
        let mut pattern = String::with_capacity(template.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(template.matches('{').count());

        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let token = rest[open + 1..]
                .find('}')
                .map(|len| &rest[open + 1..open + 1 + len]);
            match token {
                Some(name)
                    if !name.is_empty()
                        && name
                            .bytes()
                            .all(|b| b.is_ascii_alphanumeric() || b == b'_') =>
                {
                    pattern.push_str(&regex::escape(&rest[..open]));
                    pattern.push_str("([^/]+)");
                    param_names.push(name.to_string());
                    rest = &rest[open + name.len() + 2..];
                }
                _ => {
                    pattern.push_str(&regex::escape(&rest[..=open]));
                    rest = &rest[open + 1..];
                }
            }
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push('$');

        #[allow(clippy::expect_used)]
        let regex = Regex::new(&pattern).expect("failed to compile route pattern");
        (regex, param_names)
    }

    /// True iff the method is in the accepted set and the whole path
    /// matches the compiled pattern.
    ///
    /// Methods were canonicalized at construction (see
    /// [`parse_method`](crate::request::parse_method)), so the comparison
    /// here is case-insensitive without renormalizing. The pattern is
    /// anchored at both ends: `/users/1` never matches a route with extra
    /// trailing segments.
    #[must_use]
    pub fn matches(&self, path: &str, method: &Method) -> bool {
        self.methods.contains(method) && self.pattern.is_match(path)
    }

    /// Pair each placeholder name with its captured path segment.
    ///
    /// Returns an empty mapping when the path does not match. Capture
    /// order aligns 1:1 with placeholder-declaration order.
    #[must_use]
    pub fn extract_params(&self, path: &str) -> ParamVec {
        let mut params = ParamVec::new();
        if let Some(caps) = self.pattern.captures(path) {
            for (idx, name) in self.param_names.iter().enumerate() {
                if let Some(capture) = caps.get(idx + 1) {
                    params.push((Arc::from(name.as_str()), capture.as_str().to_string()));
                }
            }
        }
        params
    }

    /// Append a middleware to this route's chain.
    ///
    /// Middleware runs in the order added: the first added is outermost.
    /// Returns `&mut Self` so registration can chain.
    pub fn middleware(&mut self, mw: Arc<dyn Middleware>) -> &mut Self {
        self.middlewares.push(mw);
        self
    }

    /// The original path template, including any group prefix.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Accepted methods.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Placeholder names in appearance order.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub(crate) fn handler(&self) -> &Handler {
        &self.handler
    }

    pub(crate) fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("template", &self.template)
            .field("param_names", &self.param_names)
            .field("handler", &self.handler)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

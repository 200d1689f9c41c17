//! Pattern-based command routing.
//!
//! Routes are tried strictly in registration order and the first full match
//! wins. Overlapping patterns are never ranked by specificity: register the
//! narrower pattern first if it should take precedence.
//!
//! # Example
//!
//! ```
//! use clapp::router::{Dispatch, Router};
//!
//! let mut router = Router::new();
//! router.register(r"count n:^\d+$", "count", None);
//! router.register("greet [name]", "greet", Some("Say hello"));
//!
//! let argv = ["app", "greet", "--loud", "Ada"];
//! match router.dispatch(&argv) {
//!     Dispatch::Matched { handler, captures } => {
//!         assert_eq!(*handler, "greet");
//!         assert_eq!(captures.get("name"), Some("Ada"));
//!     }
//!     Dispatch::NotFound => unreachable!(),
//! }
//! ```

pub mod pattern;

pub use pattern::{Captures, Pattern, Word};

use tracing::debug;

use crate::flags::positional_tokens;

/// A registered pattern with its handler.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub pattern: Pattern,
    pub handler: H,
    pub description: Option<String>,
}

/// Result of routing an argument vector.
#[derive(Debug)]
pub enum Dispatch<'r, H> {
    Matched { handler: &'r H, captures: Captures },
    NotFound,
}

impl<H> Dispatch<'_, H> {
    pub fn is_found(&self) -> bool {
        matches!(self, Dispatch::Matched { .. })
    }
}

/// Ordered registration table.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and append it. Duplicates are kept; the earlier one
    /// shadows the later.
    pub fn register(&mut self, pattern: &str, handler: H, description: Option<&str>) {
        self.routes.push(Route {
            pattern: Pattern::compile(pattern),
            handler,
            description: description.map(str::to_string),
        });
    }

    /// Builder form of [`register`](Self::register).
    pub fn route(mut self, pattern: &str, handler: H) -> Self {
        self.register(pattern, handler, None);
        self
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route a full argument vector. The first token is the command name and
    /// is ignored, as are dash-prefixed tokens.
    pub fn dispatch<S: AsRef<str>>(&self, args: &[S]) -> Dispatch<'_, H> {
        let positional = positional_tokens(args);

        for route in &self.routes {
            if let Some(captures) = route.pattern.match_tokens(&positional) {
                debug!(pattern = route.pattern.source(), "route matched");
                return Dispatch::Matched {
                    handler: &route.handler,
                    captures,
                };
            }
        }

        debug!(tokens = ?positional, "no route matched");
        Dispatch::NotFound
    }
}

/// Whether `pattern` matches `args` (full argument vector, first token
/// ignored), with the resulting bindings.
pub fn handler_matches<S: AsRef<str>>(pattern: &str, args: &[S]) -> Option<Captures> {
    Pattern::compile(pattern).match_tokens(&positional_tokens(args))
}

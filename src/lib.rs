//! A named-route HTTP router.
//!
//! Routes carry a name, an optional host, a path template, a method set, a
//! handler and middlewares. A request is matched against the routes of its
//! host (host-bound routes first, then host-agnostic ones, each in
//! registration order); the first route accepting both the path and the
//! method wins. A path that matches but with the wrong method yields
//! [`MethodNotAllowedError`] with every method that would have matched, a
//! path that matches nothing yields [`RouteNotFoundError`].
//!
//! ```
//! use keyway_router::{Router, RouterError, SimpleRequest};
//!
//! let mut router: Router<SimpleRequest, String> = Router::new();
//! router
//!     .get("user.get", "/users/{id:@int}", |req: SimpleRequest| {
//!         format!("user {}", req.param("id").unwrap())
//!     })
//!     .unwrap();
//!
//! let res = router.handle(SimpleRequest::get("/users/42")).unwrap();
//! assert_eq!(res, "user 42");
//!
//! let err = router
//!     .handle(SimpleRequest::new("POST", "", "/users/42"))
//!     .unwrap_err();
//! assert!(matches!(err, RouterError::MethodNotAllowed(_)));
//! assert_eq!(router.generate_uri("user.get", [("id", "7")], true).unwrap(), "/users/7");
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod host;
mod method;
mod params;
mod route;
mod router;
mod strmap;

pub mod dispatch;
pub mod pattern;
pub mod registry;
pub mod request;

pub use crate::config::RouterConfig;
pub use crate::dispatch::{
    dispatch, middleware_fn, Endpoint, Handler, HandlerRef, Middleware, MiddlewareRef, Next,
};
pub use crate::error::{
    DuplicateRouteError, InvalidRouteError, MethodNotAllowedError, PathBuildError, PatternError,
    RouteNotFoundError, RouterError,
};
pub use crate::host::HostTable;
pub use crate::method::MethodSet;
pub use crate::params::Params;
pub use crate::pattern::{ConstraintAliases, PathPattern, PatternCompiler};
pub use crate::registry::{RouteMatch, RouteRegistry};
pub use crate::request::{RouteRequest, SimpleRequest};
pub use crate::route::{Route, RouteBuilder, RouteMetadata, WILDCARD_HOST};
pub use crate::router::{Group, Router, ANY_METHODS};

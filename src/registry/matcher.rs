use super::RouteRegistry;
use crate::error::{MethodNotAllowedError, RouteNotFoundError, RouterError};
use crate::method::MethodSet;
use crate::params::Params;
use crate::route::Route;

use std::sync::Arc;

/// The route selected for a request and the path variables it bound.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    route: Arc<Route>,
    params: Params,
}

impl RouteMatch {
    pub fn new(route: Arc<Route>, params: Params) -> Self {
        Self { route, params }
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn name(&self) -> &str {
        self.route.name()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// A bound path variable, falling back to the route attribute of the
    /// same name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .or_else(|| self.route.attribute(name))
    }

    pub fn into_parts(self) -> (Arc<Route>, Params) {
        (self.route, self.params)
    }
}

impl<T> RouteRegistry<T> {
    /// Selects the route for a request.
    ///
    /// Candidates are tried host-bound first, then host-agnostic, each in
    /// registration order; the first route matching both path and method
    /// wins. Routes that match the path but not the method contribute to
    /// the allowed set of a [`MethodNotAllowedError`]. If no route matches
    /// the path at all the result is a [`RouteNotFoundError`].
    pub fn find(
        &self,
        host: &str,
        path: &str,
        method: &str,
    ) -> Result<(&T, RouteMatch), RouterError> {
        let mut allowed = MethodSet::new();

        for entry in self.candidates(host, path) {
            let route = &entry.route;
            let params = match route.pattern().match_path(path) {
                Some(p) => p,
                None => {
                    tracing::trace!(route = route.name(), path, "path mismatch");
                    continue;
                }
            };

            if !route.allows(method) {
                tracing::trace!(route = route.name(), method, "method mismatch");
                allowed.union_with(route.methods());
                continue;
            }

            tracing::debug!(route = route.name(), host, path, method, "route matched");
            let m = RouteMatch::new(Arc::clone(route), params);
            return Ok((&entry.data, m));
        }

        if allowed.is_empty() {
            tracing::debug!(host, path, method, "no route found");
            Err(RouteNotFoundError::Path {
                host: host.to_owned(),
                path: path.to_owned(),
            }
            .into())
        } else {
            tracing::debug!(host, path, method, allowed = %allowed, "method not allowed");
            Err(MethodNotAllowedError {
                method: method.to_owned(),
                path: path.to_owned(),
                allowed,
            }
            .into())
        }
    }
}

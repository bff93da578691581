use super::{Router, ANY_METHODS};
use crate::dispatch::{Endpoint, Handler, Middleware, MiddlewareRef};
use crate::error::RouterError;
use crate::route::RouteBuilder;

use std::sync::Arc;

/// Registration scope created by [`Router::group`]. Routes added here get
/// the group's path prefix and middlewares.
pub struct Group<'r, Req, Res> {
    router: &'r mut Router<Req, Res>,
    prefix: String,
    middlewares: Vec<MiddlewareRef<Req, Res>>,
}

impl<'r, Req, Res> Group<'r, Req, Res> {
    pub(super) fn new(
        router: &'r mut Router<Req, Res>,
        prefix: &str,
        middlewares: Vec<MiddlewareRef<Req, Res>>,
    ) -> Self {
        Self {
            router,
            prefix: prefix.trim_end_matches('/').to_owned(),
            middlewares,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Adds a middleware for the routes registered after this call.
    pub fn middleware<M>(&mut self, middleware: M) -> &mut Self
    where
        M: Middleware<Req, Res> + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    pub fn add(
        &mut self,
        route: RouteBuilder,
        endpoint: impl Into<Endpoint<Req, Res>>,
    ) -> Result<&mut Self, RouterError> {
        let mut endpoint = endpoint.into();
        endpoint.prepend_middlewares(&self.middlewares);
        self.router.add(route.prefix(&self.prefix), endpoint)?;
        Ok(self)
    }

    pub fn route<H>(
        &mut self,
        methods: &[&str],
        name: impl Into<String>,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError>
    where
        H: Handler<Req, Res> + Send + Sync + 'static,
    {
        let route = RouteBuilder::new(name, path).with_methods(methods.iter().copied());
        self.add(route, Endpoint::new(handler))
    }

    define_methods!();

    /// A nested group. It inherits this group's prefix and middlewares.
    pub fn group<I, F>(&mut self, prefix: &str, middlewares: I, f: F) -> Result<&mut Self, RouterError>
    where
        I: IntoIterator<Item = MiddlewareRef<Req, Res>>,
        F: FnOnce(&mut Group<'_, Req, Res>) -> Result<(), RouterError>,
    {
        let prefix = format!("{}{}", self.prefix, prefix);
        let mut inherited = self.middlewares.clone();
        inherited.extend(middlewares);
        let mut group = Group::new(&mut *self.router, &prefix, inherited);
        f(&mut group)?;
        Ok(self)
    }
}

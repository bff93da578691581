macro_rules! define_method {
    ($name:ident, $method:expr) => {
        pub fn $name<H>(
            &mut self,
            name: impl Into<String>,
            path: &str,
            handler: H,
        ) -> Result<&mut Self, RouterError>
        where
            H: Handler<Req, Res> + Send + Sync + 'static,
        {
            self.route(&[$method], name, path, handler)
        }
    };
}

macro_rules! define_methods {
    () => {
        define_method!(get, "GET");
        define_method!(post, "POST");
        define_method!(put, "PUT");
        define_method!(patch, "PATCH");
        define_method!(delete, "DELETE");
        define_method!(head, "HEAD");
        define_method!(options, "OPTIONS");

        /// Registers `handler` for every method in [`ANY_METHODS`].
        pub fn any<H>(
            &mut self,
            name: impl Into<String>,
            path: &str,
            handler: H,
        ) -> Result<&mut Self, RouterError>
        where
            H: Handler<Req, Res> + Send + Sync + 'static,
        {
            self.route(ANY_METHODS, name, path, handler)
        }
    };
}

mod group;
mod router_macro;

pub use self::group::Group;

use crate::config::RouterConfig;
use crate::dispatch::{dispatch, Endpoint, Handler, Middleware, MiddlewareRef};
use crate::error::{RouteNotFoundError, RouterError};
use crate::host::HostTable;
use crate::method::MethodSet;
use crate::pattern::PatternCompiler;
use crate::registry::{RouteMatch, RouteRegistry};
use crate::request::RouteRequest;
use crate::route::{Route, RouteBuilder, RouteMetadata};

use std::fmt;
use std::sync::Arc;

/// Methods registered by `any`.
pub const ANY_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Named routes, their handlers, and the router-wide middleware chain.
///
/// Build it once, then share it read-only: matching and dispatch take
/// `&self`.
pub struct Router<Req, Res> {
    compiler: PatternCompiler,
    registry: RouteRegistry<Endpoint<Req, Res>>,
    middlewares: Vec<MiddlewareRef<Req, Res>>,
}

impl<Req, Res> Default for Router<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> fmt::Debug for Router<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.registry.len())
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

impl<Req, Res> Router<Req, Res> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        let mut registry = RouteRegistry::with_hosts(config.hosts);
        registry.set_prefilter(config.prefilter);
        Self {
            compiler: PatternCompiler::new(config.aliases),
            registry,
            middlewares: Vec::new(),
        }
    }

    pub fn compiler(&self) -> &PatternCompiler {
        &self.compiler
    }

    pub fn registry(&self) -> &RouteRegistry<Endpoint<Req, Res>> {
        &self.registry
    }

    pub fn hosts(&self) -> &HostTable {
        self.registry.hosts()
    }

    pub fn add_host<I, S>(&mut self, alias: &str, hostnames: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.hosts_mut().add(alias, hostnames);
        self
    }

    /// Appends a middleware that runs for every matched route, before the
    /// route's own middlewares.
    pub fn middleware<M>(&mut self, middleware: M) -> &mut Self
    where
        M: Middleware<Req, Res> + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    pub fn middlewares(&self) -> &[MiddlewareRef<Req, Res>] {
        &self.middlewares
    }

    /// Compiles and registers a route. On error nothing is registered.
    pub fn add(
        &mut self,
        route: RouteBuilder,
        endpoint: impl Into<Endpoint<Req, Res>>,
    ) -> Result<&mut Self, RouterError> {
        let route = route.compile(&self.compiler)?;
        self.registry.add(route, endpoint.into())?;
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

    /// Registers the routes added by `f` under `prefix`, with `middlewares`
    /// running before each route's own.
    pub fn group<I, F>(&mut self, prefix: &str, middlewares: I, f: F) -> Result<&mut Self, RouterError>
    where
        I: IntoIterator<Item = MiddlewareRef<Req, Res>>,
        F: FnOnce(&mut Group<'_, Req, Res>) -> Result<(), RouterError>,
    {
        let mut group = Group::new(self, prefix, middlewares.into_iter().collect());
        f(&mut group)?;
        Ok(self)
    }

    pub fn get_route(&self, name: &str) -> Result<&Arc<Route>, RouterError> {
        Ok(self.registry.get(name)?.route())
    }

    pub fn get_route_for_host(&self, host_key: &str, name: &str) -> Result<&Arc<Route>, RouterError> {
        Ok(self.registry.get_by_host_and_name(host_key, name)?.route())
    }

    pub fn all_routes(&self) -> impl Iterator<Item = &Arc<Route>> + '_ {
        self.registry.iter().map(|r| r.route())
    }

    pub fn routes_for_host<'a>(&'a self, host: &str) -> impl Iterator<Item = &'a Arc<Route>> {
        self.registry.routes_for_host(host).map(|r| r.route())
    }

    pub fn allowed_methods(&self, host: &str) -> MethodSet {
        self.registry.allowed_methods(host)
    }

    /// Builds the path of route `name` from `values`.
    pub fn generate_uri<I, K, V>(&self, name: &str, values: I, strict: bool) -> Result<String, RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let route = self.get_route(name)?;
        Ok(route.uri(values, strict)?)
    }

    /// Edits the descriptive fields of a registered route. Matches handed
    /// out earlier keep the old copy.
    pub fn update_metadata<F>(&mut self, name: &str, f: F) -> Result<(), RouterError>
    where
        F: FnOnce(&mut RouteMetadata),
    {
        let route = self
            .registry
            .route_mut(name)
            .ok_or_else(|| RouteNotFoundError::Name {
                name: name.to_owned(),
            })?;
        f(Arc::make_mut(route).metadata_mut());
        Ok(())
    }

    /// Matches without dispatching.
    pub fn find(&self, host: &str, path: &str, method: &str) -> Result<RouteMatch, RouterError> {
        let (_, m) = self.registry.find(host, path, method)?;
        Ok(m)
    }

    /// Matches `req`, attaches the match to it and runs the middleware
    /// chain. Errors of handlers travel inside `Res`; the only errors here
    /// are routing failures.
    pub fn handle(&self, mut req: Req) -> Result<Res, RouterError>
    where
        Req: RouteRequest,
    {
        let (endpoint, m) = self.registry.find(req.host(), req.path(), req.method())?;
        req.set_route_match(m);
        Ok(dispatch(req, endpoint, &self.middlewares))
    }
}

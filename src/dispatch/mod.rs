mod handler;
mod middleware;

pub use self::handler::{BoxHandler, Deferred, Handler, HandlerRef};
pub use self::middleware::{middleware_fn, Middleware, MiddlewareRef};

use std::fmt;
use std::sync::Arc;

/// The rest of a dispatch chain, handed to each middleware.
///
/// Nothing further down runs until [`run`](Next::run) is called. A
/// deferred handler is built only when the chain reaches it.
pub struct Next<'a, Req, Res> {
    global: &'a [MiddlewareRef<Req, Res>],
    local: &'a [MiddlewareRef<Req, Res>],
    handler: &'a HandlerRef<Req, Res>,
}

impl<'a, Req, Res> Next<'a, Req, Res> {
    pub fn run(self, req: Req) -> Res {
        if let Some((first, rest)) = self.global.split_first() {
            let next = Next {
                global: rest,
                local: self.local,
                handler: self.handler,
            };
            return first.process(req, next);
        }
        if let Some((first, rest)) = self.local.split_first() {
            let next = Next {
                global: self.global,
                local: rest,
                handler: self.handler,
            };
            return first.process(req, next);
        }
        self.handler.resolve().call(req)
    }

    /// Middlewares still ahead of the handler.
    pub fn remaining(&self) -> usize {
        self.global.len() + self.local.len()
    }
}

/// What a route dispatches to: its handler and its own middlewares.
pub struct Endpoint<Req, Res> {
    handler: HandlerRef<Req, Res>,
    middlewares: Vec<MiddlewareRef<Req, Res>>,
}

impl<Req, Res> Endpoint<Req, Res> {
    pub fn new<H>(handler: H) -> Self
    where
        H: Handler<Req, Res> + Send + Sync + 'static,
    {
        Self::from_ref(HandlerRef::new(handler))
    }

    pub fn from_ref(handler: HandlerRef<Req, Res>) -> Self {
        Self {
            handler,
            middlewares: Vec::new(),
        }
    }

    pub fn middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<Req, Res> + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    pub fn with_middlewares<I>(mut self, middlewares: I) -> Self
    where
        I: IntoIterator<Item = MiddlewareRef<Req, Res>>,
    {
        self.middlewares.extend(middlewares);
        self
    }

    pub fn handler(&self) -> &HandlerRef<Req, Res> {
        &self.handler
    }

    pub fn middlewares(&self) -> &[MiddlewareRef<Req, Res>] {
        &self.middlewares
    }

    pub(crate) fn prepend_middlewares(&mut self, middlewares: &[MiddlewareRef<Req, Res>]) {
        if !middlewares.is_empty() {
            self.middlewares.splice(0..0, middlewares.iter().cloned());
        }
    }
}

impl<Req, Res> From<HandlerRef<Req, Res>> for Endpoint<Req, Res> {
    fn from(handler: HandlerRef<Req, Res>) -> Self {
        Self::from_ref(handler)
    }
}

impl<Req, Res> fmt::Debug for Endpoint<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("handler", &self.handler)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

/// Runs `global` middlewares, then the endpoint's own, then its handler.
pub fn dispatch<Req, Res>(
    req: Req,
    endpoint: &Endpoint<Req, Res>,
    global: &[MiddlewareRef<Req, Res>],
) -> Res {
    if global.is_empty() && endpoint.middlewares.is_empty() {
        return endpoint.handler.resolve().call(req);
    }
    let next = Next {
        global,
        local: &endpoint.middlewares,
        handler: &endpoint.handler,
    };
    next.run(req)
}

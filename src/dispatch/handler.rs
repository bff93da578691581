use std::fmt;
use std::sync::{Arc, OnceLock};

/// The terminal step of a dispatch chain.
pub trait Handler<Req, Res> {
    fn call(&self, req: Req) -> Res;
}

pub type BoxHandler<Req, Res> = Arc<dyn Handler<Req, Res> + Send + Sync>;

impl<F, Req, Res> Handler<Req, Res> for F
where
    F: Fn(Req) -> Res,
{
    fn call(&self, req: Req) -> Res {
        (self)(req)
    }
}

type Factory<Req, Res> = Box<dyn Fn() -> BoxHandler<Req, Res> + Send + Sync>;

/// A handler produced on first use.
pub struct Deferred<Req, Res> {
    factory: Factory<Req, Res>,
    resolved: OnceLock<BoxHandler<Req, Res>>,
}

impl<Req, Res> Deferred<Req, Res> {
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    fn resolve(&self) -> &BoxHandler<Req, Res> {
        self.resolved.get_or_init(|| {
            tracing::trace!("resolving deferred handler");
            (self.factory)()
        })
    }
}

/// How a route refers to its handler.
pub enum HandlerRef<Req, Res> {
    Direct(BoxHandler<Req, Res>),
    Deferred(Arc<Deferred<Req, Res>>),
}

impl<Req, Res> HandlerRef<Req, Res> {
    pub fn new<H>(handler: H) -> Self
    where
        H: Handler<Req, Res> + Send + Sync + 'static,
    {
        Self::Direct(Arc::new(handler))
    }

    /// The factory runs at most once, when the route is first dispatched.
    pub fn deferred<F, H>(factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: Handler<Req, Res> + Send + Sync + 'static,
        Req: 'static,
        Res: 'static,
    {
        let factory: Factory<Req, Res> =
            Box::new(move || Arc::new(factory()) as BoxHandler<Req, Res>);
        Self::Deferred(Arc::new(Deferred {
            factory,
            resolved: OnceLock::new(),
        }))
    }

    pub fn resolve(&self) -> &(dyn Handler<Req, Res> + Send + Sync) {
        match self {
            Self::Direct(h) => &**h,
            Self::Deferred(d) => &**d.resolve(),
        }
    }
}

impl<Req, Res> Clone for HandlerRef<Req, Res> {
    fn clone(&self) -> Self {
        match self {
            Self::Direct(h) => Self::Direct(Arc::clone(h)),
            Self::Deferred(d) => Self::Deferred(Arc::clone(d)),
        }
    }
}

impl<Req, Res> fmt::Debug for HandlerRef<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("HandlerRef::Direct"),
            Self::Deferred(d) => f
                .debug_struct("HandlerRef::Deferred")
                .field("resolved", &d.is_resolved())
                .finish(),
        }
    }
}

use super::Next;

use std::sync::Arc;

/// A request interceptor.
///
/// A middleware may change the request before calling `next.run(req)`,
/// change the response afterwards, or return a response of its own without
/// calling `next` at all, which ends the chain.
pub trait Middleware<Req, Res> {
    fn process(&self, req: Req, next: Next<'_, Req, Res>) -> Res;
}

pub type MiddlewareRef<Req, Res> = Arc<dyn Middleware<Req, Res> + Send + Sync>;

impl<F, Req, Res> Middleware<Req, Res> for F
where
    F: for<'a> Fn(Req, Next<'a, Req, Res>) -> Res,
{
    fn process(&self, req: Req, next: Next<'_, Req, Res>) -> Res {
        (self)(req, next)
    }
}

/// Pins down the signature of a middleware closure, so that
/// `middleware_fn(|req, next| next.run(req))` infers its argument types.
pub fn middleware_fn<Req, Res, F>(f: F) -> F
where
    F: for<'a> Fn(Req, Next<'a, Req, Res>) -> Res,
{
    f
}

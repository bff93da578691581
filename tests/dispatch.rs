use keyway_router::{
    dispatch, middleware_fn, Endpoint, HandlerRef, Middleware, MiddlewareRef, Next, Route,
    RouteRequest, Router, SimpleRequest,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

struct Trace {
    name: &'static str,
    log: Log,
    short_circuit: bool,
}

impl Trace {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            short_circuit: false,
        }
    }

    fn stopping(mut self) -> Self {
        self.short_circuit = true;
        self
    }
}

impl Middleware<SimpleRequest, String> for Trace {
    fn process(&self, req: SimpleRequest, next: Next<'_, SimpleRequest, String>) -> String {
        self.log.lock().unwrap().push(format!("{}:pre", self.name));
        if self.short_circuit {
            return format!("stopped by {}", self.name);
        }
        let res = next.run(req);
        self.log.lock().unwrap().push(format!("{}:post", self.name));
        format!("{}({})", self.name, res)
    }
}

fn handler(log: &Log) -> impl Fn(SimpleRequest) -> String + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |_req| {
        log.lock().unwrap().push("handler".to_owned());
        "done".to_owned()
    }
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[test]
fn dispatch_runs_in_order() {
    let log = Log::default();
    let endpoint = Endpoint::new(handler(&log))
        .middleware(Trace::new("m2", &log))
        .middleware(Trace::new("m3", &log));
    let global: Vec<MiddlewareRef<SimpleRequest, String>> = vec![Arc::new(Trace::new("m1", &log))];

    let res = dispatch(SimpleRequest::get("/"), &endpoint, &global);

    assert_eq!(res, "m1(m2(m3(done)))");
    assert_eq!(
        entries(&log),
        ["m1:pre", "m2:pre", "m3:pre", "handler", "m3:post", "m2:post", "m1:post"]
    );
}

#[test]
fn dispatch_short_circuit() {
    let log = Log::default();
    let endpoint = Endpoint::new(handler(&log))
        .middleware(Trace::new("m1", &log))
        .middleware(Trace::new("m2", &log).stopping())
        .middleware(Trace::new("m3", &log));

    let res = dispatch(SimpleRequest::get("/"), &endpoint, &[]);

    assert_eq!(res, "m1(stopped by m2)");
    assert_eq!(entries(&log), ["m1:pre", "m2:pre", "m1:post"]);
}

#[test]
fn dispatch_short_circuit_skips_deferred_handler() {
    let log = Log::default();
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let handler: HandlerRef<SimpleRequest, String> = HandlerRef::deferred(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        |_: SimpleRequest| String::from("secret")
    });

    let denied = Endpoint::from_ref(handler.clone()).middleware(Trace::new("auth", &log).stopping());
    assert_eq!(dispatch(SimpleRequest::get("/"), &denied, &[]), "stopped by auth");
    assert_eq!(built.load(Ordering::SeqCst), 0);

    let allowed = Endpoint::from_ref(handler).middleware(Trace::new("auth", &log));
    assert_eq!(dispatch(SimpleRequest::get("/"), &allowed, &[]), "auth(secret)");
    assert_eq!(dispatch(SimpleRequest::get("/"), &denied, &[]), "stopped by auth");
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn dispatch_without_middleware_calls_handler() {
    let log = Log::default();
    let endpoint: Endpoint<SimpleRequest, String> = Endpoint::new(handler(&log));
    assert_eq!(dispatch(SimpleRequest::get("/"), &endpoint, &[]), "done");
    assert_eq!(entries(&log), ["handler"]);
}

#[test]
fn dispatch_middleware_can_rewrite_request() {
    let endpoint = Endpoint::new(|req: SimpleRequest| {
        req.attribute("user").unwrap_or("anonymous").to_owned()
    })
    .middleware(middleware_fn(|mut req: SimpleRequest, next| -> String {
        req.set_attribute("user", "alice");
        next.run(req)
    }));

    assert_eq!(dispatch(SimpleRequest::get("/"), &endpoint, &[]), "alice");
}

#[test]
fn router_global_then_group_then_route_middleware() {
    let log = Log::default();
    let mut router: Router<SimpleRequest, String> = Router::new();
    router.middleware(Trace::new("global", &log));

    let group_mw: MiddlewareRef<SimpleRequest, String> = Arc::new(Trace::new("group", &log));
    let route_log = Arc::clone(&log);
    router
        .group("/admin", vec![group_mw], move |admin| {
            admin.add(
                Route::builder("admin.users", "/users/{id}").method("GET"),
                Endpoint::new(handler(&route_log)).middleware(Trace::new("route", &route_log)),
            )?;
            Ok(())
        })
        .unwrap();

    let res = router.handle(SimpleRequest::get("/admin/users/1")).unwrap();
    assert_eq!(res, "global(group(route(done)))");
    assert_eq!(
        entries(&log),
        [
            "global:pre",
            "group:pre",
            "route:pre",
            "handler",
            "route:post",
            "group:post",
            "global:post"
        ]
    );
}

#[test]
fn router_middleware_sees_route_match() {
    let mut router: Router<SimpleRequest, String> = Router::new();
    router.middleware(middleware_fn(|req: SimpleRequest, next| -> String {
        let name = req
            .route_match()
            .map(|m| m.name().to_owned())
            .unwrap_or_default();
        format!("[{}] {}", name, next.run(req))
    }));
    router
        .get("page", "/pages/{slug}", |req: SimpleRequest| {
            req.param("slug").unwrap_or_default().to_owned()
        })
        .unwrap();

    assert_eq!(
        router.handle(SimpleRequest::get("/pages/intro")).unwrap(),
        "[page] intro"
    );
}

#[test]
fn router_unmatched_request_runs_no_middleware() {
    let log = Log::default();
    let mut router: Router<SimpleRequest, String> = Router::new();
    router.middleware(Trace::new("global", &log));
    router.get("home", "/", handler(&log)).unwrap();

    assert!(router.handle(SimpleRequest::get("/missing")).is_err());
    assert!(entries(&log).is_empty());
}

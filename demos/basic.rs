use keyway_router::{
    middleware_fn, Endpoint, Route, RouteRequest, Router, RouterConfig, RouterError, SimpleRequest,
};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn show_user(req: SimpleRequest) -> String {
    format!("user #{}", req.param("id").unwrap_or("?"))
}

fn build() -> Result<Router<SimpleRequest, String>, RouterError> {
    let config = RouterConfig::new()
        .with_host("admin", ["admin.example.com"])
        .with_alias("lang", "en|fr|de");
    let mut router = Router::with_config(config);

    router.middleware(middleware_fn(|req: SimpleRequest, next| -> String {
        let name = req.route_match().map(|m| m.name().to_owned());
        let res = next.run(req);
        info!(route = ?name, %res, "handled");
        res
    }));

    router
        .get("user.show", "/users/{id:@int}", show_user)?
        .get("docs", "/{lang:@lang}/docs[/{page:@slug}]", |req: SimpleRequest| {
            format!(
                "docs ({}) {}",
                req.param("lang").unwrap_or_default(),
                req.param("page").unwrap_or("index")
            )
        })?
        .add(
            Route::builder("dashboard", "/")
                .method("GET")
                .host("admin")
                .summary("Admin dashboard"),
            Endpoint::new(|_: SimpleRequest| String::from("admin dashboard")),
        )?;

    router.group("/api", Vec::new(), |api| {
        api.get("api.user", "/users/{id:@int}", show_user)?;
        api.post("api.user.create", "/users", |_: SimpleRequest| {
            String::from("created")
        })?;
        Ok(())
    })?;

    Ok(router)
}

fn main() -> Result<(), RouterError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let router = build()?;

    for route in router.all_routes() {
        info!(name = route.name(), host = route.host_key(), path = route.path(), methods = %route.methods(), "route");
    }

    let requests = [
        SimpleRequest::get("/users/42"),
        SimpleRequest::get("/fr/docs/install"),
        SimpleRequest::get("/").with_host("admin.example.com"),
        SimpleRequest::new("POST", "", "/api/users"),
        SimpleRequest::new("DELETE", "", "/api/users/1"),
        SimpleRequest::get("/missing"),
    ];
    for req in requests {
        match router.handle(req) {
            Ok(res) => println!("200 {}", res),
            Err(err) => println!("{} {}", err.status_code(), err),
        }
    }

    let uri = router.generate_uri("docs", [("lang", "de"), ("page", "faq")], true)?;
    println!("docs uri: {}", uri);

    Ok(())
}

use keyway_router::{
    MethodSet, PatternCompiler, Route, RouteBuilder, RouteNotFoundError, RouteRegistry,
    RouterError,
};

fn route(name: &str, path: &str, methods: &[&str]) -> RouteBuilder {
    Route::builder(name, path).with_methods(methods.iter().copied())
}

fn compile(builder: RouteBuilder) -> Route {
    builder.compile(&PatternCompiler::default()).unwrap()
}

fn find(registry: &RouteRegistry<usize>, host: &str, path: &str, method: &str) -> Result<usize, RouterError> {
    registry.find(host, path, method).map(|(&data, _)| data)
}

#[test]
fn registry_duplicate_name_rejected() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry
        .add(compile(route("user", "/users/{id}", &["GET"])), 1)
        .unwrap();

    let err = registry
        .add(compile(route("user", "/people/{id}", &["POST"])), 2)
        .unwrap_err();
    assert_eq!(err.name, "user");
    assert_eq!(err.host_key, "*");

    let kept = registry.get("user").unwrap();
    assert_eq!(*kept.data(), 1);
    assert_eq!(kept.route().path(), "/users/{id}");
    assert_eq!(registry.len(), 1);

    // Same name under another host-key is fine.
    registry
        .add(compile(route("user", "/users/{id}", &["GET"]).host("admin")), 3)
        .unwrap();
    assert_eq!(
        *registry.get_by_host_and_name("admin", "user").unwrap().data(),
        3
    );
    assert_eq!(*registry.get_by_host_and_name("*", "user").unwrap().data(), 1);
}

#[test]
fn registry_lookup_errors() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry
        .add(compile(route("home", "/", &["GET"]).host("main")), 0)
        .unwrap();

    assert!(registry.get("home").is_ok());
    assert!(matches!(
        registry.get("missing"),
        Err(RouteNotFoundError::Name { name }) if name == "missing"
    ));
    assert!(matches!(
        registry.get_by_host_and_name("*", "home"),
        Err(RouteNotFoundError::HostName { .. })
    ));
}

#[test]
fn registry_routes_for_host_order() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry.hosts_mut().add("main", ["example.com", "www.example.com"]);

    registry.add(compile(route("g1", "/a", &["GET"])), 1).unwrap();
    registry
        .add(compile(route("m1", "/b", &["POST"]).host("main")), 2)
        .unwrap();
    registry
        .add(compile(route("l1", "/c", &["PUT"]).host("static.test")), 3)
        .unwrap();
    registry.add(compile(route("g2", "/d", &["GET"])), 4).unwrap();
    registry
        .add(compile(route("m2", "/e", &["DELETE"]).host("main")), 5)
        .unwrap();

    let order: Vec<usize> = registry
        .routes_for_host("www.example.com")
        .map(|r| *r.data())
        .collect();
    assert_eq!(order, [2, 5, 1, 4]);

    let order: Vec<usize> = registry
        .routes_for_host("static.test")
        .map(|r| *r.data())
        .collect();
    assert_eq!(order, [3, 1, 4]);

    let order: Vec<usize> = registry
        .routes_for_host("unknown.test")
        .map(|r| *r.data())
        .collect();
    assert_eq!(order, [1, 4]);

    let methods = registry.allowed_methods("example.com");
    let expected: MethodSet = ["POST", "DELETE", "GET"].iter().collect();
    assert_eq!(methods, expected);

    let all: Vec<usize> = registry.iter().map(|r| *r.data()).collect();
    assert_eq!(all, [1, 2, 3, 4, 5]);
}

#[test]
fn matcher_example_scenario() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry
        .add(compile(route("user.get", "/users/{id}", &["GET"])), 1)
        .unwrap();

    let (_, m) = registry.find("", "/users/42", "GET").unwrap();
    assert_eq!(m.name(), "user.get");
    assert_eq!(m.params().get("id"), Some("42"));

    match registry.find("", "/users/42", "POST") {
        Err(RouterError::MethodNotAllowed(e)) => {
            assert_eq!(e.allowed, ["GET"].iter().collect::<MethodSet>());
            assert_eq!(e.allow_header(), "GET");
        }
        other => panic!("unexpected: {:?}", other.map(|(d, _)| *d)),
    }

    assert!(matches!(
        registry.find("", "/users", "GET"),
        Err(RouterError::RouteNotFound(RouteNotFoundError::Path { .. }))
    ));
}

#[test]
fn matcher_method_precedence_over_order() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry
        .add(compile(route("read", "/items/{id}", &["GET", "HEAD"])), 1)
        .unwrap();
    registry
        .add(compile(route("write", "/items/{id}", &["PUT", "PATCH"])), 2)
        .unwrap();

    assert_eq!(find(&registry, "", "/items/1", "PATCH").unwrap(), 2);
    assert_eq!(find(&registry, "", "/items/1", "HEAD").unwrap(), 1);
    assert_eq!(find(&registry, "", "/items/1", "get").unwrap(), 1);
}

#[test]
fn matcher_accumulates_allowed_methods() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry.add(compile(route("a", "/thing", &["GET"])), 1).unwrap();
    registry.add(compile(route("b", "/thing", &["POST"])), 2).unwrap();
    registry.add(compile(route("c", "/other", &["PATCH"])), 3).unwrap();
    registry.add(compile(route("d", "/thing", &["PUT"])), 4).unwrap();

    match registry.find("", "/thing", "DELETE") {
        Err(RouterError::MethodNotAllowed(e)) => {
            let expected: MethodSet = ["PUT", "GET", "POST"].iter().collect();
            assert_eq!(e.allowed, expected);
            assert!(!e.allowed.contains("PATCH"));
        }
        other => panic!("unexpected: {:?}", other.map(|(d, _)| *d)),
    }
}

#[test]
fn matcher_not_found_regardless_of_method() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry.add(compile(route("a", "/thing", &["GET"])), 1).unwrap();

    for method in &["GET", "POST", "DELETE", "BREW"] {
        let err = registry.find("", "/nothing", method).map(|_| ()).unwrap_err();
        assert!(err.is_not_found(), "{}: {}", method, err);
        assert_eq!(err.status_code(), 404);
    }
}

#[test]
fn matcher_host_bound_route_wins() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry.add(compile(route("any", "/", &["GET"])), 1).unwrap();
    registry
        .add(compile(route("bound", "/", &["GET"]).host("a.test")), 2)
        .unwrap();

    assert_eq!(find(&registry, "a.test", "/", "GET").unwrap(), 2);
    assert_eq!(find(&registry, "b.test", "/", "GET").unwrap(), 1);

    registry.hosts_mut().add("a.test", ["alias-of-a.test"]);
    assert_eq!(find(&registry, "alias-of-a.test", "/", "GET").unwrap(), 2);
}

#[test]
fn matcher_wrong_method_on_host_falls_back_to_wildcard() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry
        .add(compile(route("bound", "/x", &["GET"]).host("a.test")), 1)
        .unwrap();
    registry.add(compile(route("any", "/x", &["POST"])), 2).unwrap();

    assert_eq!(find(&registry, "a.test", "/x", "POST").unwrap(), 2);
    let err = find(&registry, "a.test", "/x", "PUT").unwrap_err();
    match err {
        RouterError::MethodNotAllowed(e) => assert_eq!(e.allow_header(), "GET, POST"),
        other => panic!("unexpected: {}", other),
    }
}

#[test]
fn matcher_first_registered_wins() {
    let mut registry: RouteRegistry<usize> = RouteRegistry::new();
    registry
        .add(compile(route("by-id", "/users/{id:@int}", &["GET"])), 1)
        .unwrap();
    registry
        .add(compile(route("by-name", "/users/{name}", &["GET"])), 2)
        .unwrap();
    registry
        .add(compile(route("me", "/users/me", &["GET"])), 3)
        .unwrap();

    assert_eq!(find(&registry, "", "/users/7", "GET").unwrap(), 1);
    assert_eq!(find(&registry, "", "/users/me", "GET").unwrap(), 2);
    assert_eq!(find(&registry, "", "/users/bob", "GET").unwrap(), 2);
}

#[test]
fn matcher_prefilter_does_not_change_results() {
    let templates: &[(&str, &str, &[&str])] = &[
        ("root", "/", &["GET"]),
        ("users", "/users[/{id}]", &["GET"]),
        ("user-posts", "/users/{id}/posts", &["GET", "POST"]),
        ("catch", "/{path:.+}", &["GET"]),
        ("feed", "/feed.{fmt?}", &["GET"]),
        ("posts", "/posts/{slug:@slug}", &["PUT"]),
        ("archive", "/archive[/{y}[/{m}]]", &["GET"]),
        ("user-prefix", "/user{id}", &["DELETE"]),
    ];
    let requests: &[(&str, &str)] = &[
        ("/", "GET"),
        ("/users", "GET"),
        ("/users/3", "GET"),
        ("/users/3/posts", "POST"),
        ("/users/3/posts", "DELETE"),
        ("/feed.", "GET"),
        ("/feed.rss", "GET"),
        ("/posts/a-b", "GET"),
        ("/posts/a-b", "PUT"),
        ("/archive/2020/1", "GET"),
        ("/user9", "DELETE"),
        ("/user9", "PATCH"),
        ("", "GET"),
    ];

    let build = |prefilter: bool| {
        let mut registry: RouteRegistry<usize> = RouteRegistry::new();
        registry.set_prefilter(prefilter);
        for (i, &(name, path, methods)) in templates.iter().enumerate() {
            registry.add(compile(route(name, path, methods)), i).unwrap();
        }
        registry
    };
    let indexed = build(true);
    let linear = build(false);

    for &(path, method) in requests {
        let a = indexed.find("", path, method).map(|(d, m)| (*d, m.params().clone()));
        let b = linear.find("", path, method).map(|(d, m)| (*d, m.params().clone()));
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a, b, "{} {}", method, path),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            (a, b) => panic!("{} {}: {:?} vs {:?}", method, path, a.is_ok(), b.is_ok()),
        }
    }
}

/// Declares a [`Router`](crate::Router) from `METHOD "name" "path" => handler`
/// entries. Evaluates to `Result<Router<_, _>, RouterError>`.
///
/// ```
/// use keyway_router::{router, Router, SimpleRequest};
///
/// fn hello(req: SimpleRequest) -> String {
///     format!("hello, {}", req.param("name").unwrap_or("nobody"))
/// }
///
/// let router: Router<SimpleRequest, String> = router! {
///     GET "hello" "/hello/{name}" => hello,
///     ANY "health" "/health" => |_: SimpleRequest| String::from("ok"),
/// }
/// .unwrap();
///
/// let res = router.handle(SimpleRequest::get("/hello/world")).unwrap();
/// assert_eq!(res, "hello, world");
/// ```
#[macro_export]
macro_rules! router {
    {@entry $router:expr, ANY, $name:expr, $pattern:expr, $handler:expr} => {
        $router.any($name, $pattern, $handler)?
    };
    {@entry $router:expr, $method:ident, $name:expr, $pattern:expr, $handler:expr} => {
        $router.route(&[stringify!($method)], $name, $pattern, $handler)?
    };

    {$($method:ident $name:literal $pattern:literal => $handler:expr),+ $(,)?} => {{
        (|| -> ::std::result::Result<_, $crate::RouterError> {
            let mut __router = $crate::Router::new();
            $($crate::router!(@entry __router, $method, $name, $pattern, $handler);)+
            Ok(__router)
        })()
    }};
}

use super::RouteRequest;
use crate::registry::RouteMatch;

use http::header::HOST;

impl<B> RouteRequest for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    /// The URI authority if present, else the `Host` header, without port.
    fn host(&self) -> &str {
        if let Some(host) = self.uri().host() {
            return host;
        }
        let header = match self.headers().get(HOST).and_then(|v| v.to_str().ok()) {
            Some(h) => h,
            None => return "",
        };
        strip_port(header)
    }

    /// The raw URI path. Callers that route on decoded paths must decode
    /// it before dispatching.
    fn path(&self) -> &str {
        self.uri().path()
    }

    fn set_route_match(&mut self, m: RouteMatch) {
        self.extensions_mut().insert(m);
    }

    fn route_match(&self) -> Option<&RouteMatch> {
        self.extensions().get::<RouteMatch>()
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8080
        return match host.find(']') {
            Some(i) => &host[..=i],
            None => host,
        };
    }
    match host.rfind(':') {
        Some(i) => &host[..i],
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::strip_port;

    #[test]
    fn ports_are_stripped() {
        assert_eq!(strip_port("example.com:8080"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
    }
}

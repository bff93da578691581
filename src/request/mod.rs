#[cfg(feature = "http-request")]
mod http_request;

use crate::registry::RouteMatch;

use std::collections::BTreeMap;

/// What the router needs to know about a request.
///
/// `path` is expected to be percent-decoded already.
pub trait RouteRequest {
    fn method(&self) -> &str;
    fn host(&self) -> &str;
    fn path(&self) -> &str;

    /// Attaches the matched route to the request.
    fn set_route_match(&mut self, m: RouteMatch);
    fn route_match(&self) -> Option<&RouteMatch>;
}

/// A plain request descriptor with a string attribute bag.
#[derive(Debug, Clone, Default)]
pub struct SimpleRequest {
    method: String,
    host: String,
    path: String,
    attributes: BTreeMap<String, String>,
    route_match: Option<RouteMatch>,
}

impl SimpleRequest {
    pub fn new(method: &str, host: &str, path: &str) -> Self {
        Self {
            method: method.to_owned(),
            host: host.to_owned(),
            path: path.to_owned(),
            attributes: BTreeMap::new(),
            route_match: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new("GET", "", path)
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_owned();
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// A path variable of the matched route, or the route attribute of
    /// that name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.route_match.as_ref()?.get(name)
    }
}

impl RouteRequest for SimpleRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn set_route_match(&mut self, m: RouteMatch) {
        self.route_match = Some(m);
    }

    fn route_match(&self) -> Option<&RouteMatch> {
        self.route_match.as_ref()
    }
}

use crate::error::{InvalidRouteError, PathBuildError, RouterError};
use crate::method::MethodSet;
use crate::pattern::{PathPattern, PatternCompiler};

use std::collections::BTreeMap;

/// Host-key of routes that answer on any host.
pub const WILDCARD_HOST: &str = "*";

/// Presentation-only fields. They never take part in matching.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RouteMetadata {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

/// A route definition that has not been registered yet.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    name: String,
    host: Option<String>,
    path: String,
    methods: MethodSet,
    attributes: BTreeMap<String, String>,
    metadata: RouteMetadata,
}

impl RouteBuilder {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: None,
            path: path.into(),
            methods: MethodSet::new(),
            attributes: BTreeMap::new(),
            metadata: RouteMetadata::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    /// Binds the route to a host alias or literal hostname.
    /// `"*"` means any host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        self.host = if host.is_empty() || host == WILDCARD_HOST {
            None
        } else {
            Some(host)
        };
        self
    }

    pub fn method(mut self, method: &str) -> Self {
        self.methods.insert(method);
        self
    }

    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.methods.extend(methods);
        self
    }

    /// Prepends `prefix` to the path. A trailing `/` on the prefix is dropped.
    pub fn prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        if !prefix.is_empty() {
            self.path.insert_str(0, prefix);
        }
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.path.push_str(suffix);
        self
    }

    /// Sets an attribute. An attribute named like a path variable is that
    /// variable's default value.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.metadata.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata.tags.push(tag.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.metadata.deprecated = deprecated;
        self
    }

    /// Compiles the path and freezes the definition.
    pub fn compile(self, compiler: &PatternCompiler) -> Result<Route, RouterError> {
        if self.name.is_empty() {
            return Err(InvalidRouteError {
                name: self.name,
                msg: "route name can not be empty",
            }
            .into());
        }
        if self.methods.is_empty() {
            return Err(InvalidRouteError {
                name: self.name,
                msg: "route must accept at least one method",
            }
            .into());
        }

        let mut pattern = compiler.compile(&self.path)?;
        for (k, v) in &self.attributes {
            pattern.set_default(k, v);
        }

        Ok(Route {
            name: self.name.into(),
            host: self.host.map(Into::into),
            pattern,
            methods: self.methods,
            attributes: self.attributes,
            metadata: self.metadata,
        })
    }
}

/// A registered route. Match-relevant fields can not change after
/// compilation.
#[derive(Debug, Clone)]
pub struct Route {
    name: Box<str>,
    host: Option<Box<str>>,
    pattern: PathPattern,
    methods: MethodSet,
    attributes: BTreeMap<String, String>,
    metadata: RouteMetadata,
}

impl Route {
    pub fn builder(name: impl Into<String>, path: impl Into<String>) -> RouteBuilder {
        RouteBuilder::new(name, path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The registry bucket of this route: its host, or `"*"`.
    pub fn host_key(&self) -> &str {
        self.host.as_deref().unwrap_or(WILDCARD_HOST)
    }

    pub fn path(&self) -> &str {
        self.pattern.template()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    pub fn allows(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn metadata(&self) -> &RouteMetadata {
        &self.metadata
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut RouteMetadata {
        &mut self.metadata
    }

    pub fn uri<I, K, V>(&self, values: I, strict: bool) -> Result<String, PathBuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.pattern.build(values, strict)
    }
}

use crate::method::MethodSet;

/// A path template that can not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("path template must start with '/': template = {template:?}")]
    MissingLeadingSlash { template: String },

    #[error("{msg}: template = {template:?}")]
    Syntax {
        msg: &'static str,
        template: String,
    },

    #[error("invalid variable name {name:?}: template = {template:?}")]
    InvalidVariableName { name: String, template: String },

    #[error("variable {name:?} is used more than once: template = {template:?}")]
    DuplicateVariable { name: String, template: String },

    #[error("unknown constraint alias \"@{alias}\": template = {template:?}")]
    UnknownAlias { alias: String, template: String },

    #[error("required segment follows an optional one: template = {template:?}")]
    RequiredAfterOptional { template: String },

    #[error("invalid constraint for variable {name:?}: {source}")]
    InvalidConstraint {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported constraint for variable {name:?}, {msg}: template = {template:?}")]
    UnsupportedConstraint {
        name: String,
        msg: &'static str,
        template: String,
    },

    #[error("can not compile template {template:?}: {source}")]
    Regex {
        template: String,
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    pub(crate) fn syntax(msg: &'static str, template: &str) -> Self {
        Self::Syntax {
            msg,
            template: template.to_owned(),
        }
    }
}

/// A route with the same name is already registered under the host-key.
#[derive(Debug, thiserror::Error)]
#[error("route {name:?} is already registered for host {host_key:?}")]
pub struct DuplicateRouteError {
    pub host_key: String,
    pub name: String,
}

/// A route definition that is structurally unusable.
#[derive(Debug, thiserror::Error)]
#[error("invalid route {name:?}: {msg}")]
pub struct InvalidRouteError {
    pub name: String,
    pub msg: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum RouteNotFoundError {
    #[error("no route named {name:?}")]
    Name { name: String },

    #[error("no route named {name:?} for host {host_key:?}")]
    HostName { host_key: String, name: String },

    #[error("no route matches {path:?} on host {host:?}")]
    Path { host: String, path: String },
}

#[derive(Debug, thiserror::Error)]
#[error("method {method} is not allowed for {path:?}, allowed: {allowed}")]
pub struct MethodNotAllowedError {
    pub method: String,
    pub path: String,
    pub allowed: MethodSet,
}

impl MethodNotAllowedError {
    /// The value for an `Allow` response header.
    pub fn allow_header(&self) -> String {
        self.allowed.to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PathBuildError {
    #[error("missing value for required variable {name:?}")]
    MissingVariable { name: String },

    #[error("value {value:?} does not satisfy the constraint of variable {name:?}")]
    ConstraintViolation { name: String, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    DuplicateRoute(#[from] DuplicateRouteError),

    #[error(transparent)]
    InvalidRoute(#[from] InvalidRouteError),

    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFoundError),

    #[error(transparent)]
    MethodNotAllowed(#[from] MethodNotAllowedError),

    #[error(transparent)]
    PathBuild(#[from] PathBuildError),
}

impl RouterError {
    /// The HTTP status an embedding application usually answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RouteNotFound(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            _ => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound(_))
    }

    pub fn is_method_not_allowed(&self) -> bool {
        matches!(self, Self::MethodNotAllowed(_))
    }
}

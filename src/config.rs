use crate::host::HostTable;
use crate::pattern::ConstraintAliases;

/// Construction-time settings of a [`Router`](crate::Router).
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub aliases: ConstraintAliases,
    pub hosts: HostTable,
    /// Skip routes whose leading literal segment can not match the request
    /// path. Never changes which route is selected.
    pub prefilter: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            aliases: ConstraintAliases::default(),
            hosts: HostTable::new(),
            prefilter: true,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(mut self, aliases: ConstraintAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_alias(mut self, name: &str, regex: &str) -> Self {
        self.aliases.insert(name, regex);
        self
    }

    pub fn with_hosts(mut self, hosts: HostTable) -> Self {
        self.hosts = hosts;
        self
    }

    pub fn with_host<I, S>(mut self, alias: &str, hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.hosts.add(alias, hostnames);
        self
    }

    pub fn with_prefilter(mut self, enabled: bool) -> Self {
        self.prefilter = enabled;
        self
    }
}

/// Maps host aliases to the hostnames they cover.
///
/// Resolution is an exact, case-sensitive comparison; entries are scanned
/// in insertion order and the first alias listing the hostname wins.
#[derive(Debug, Default, Clone)]
pub struct HostTable {
    entries: Vec<(Box<str>, Vec<Box<str>>)>,
}

impl HostTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `hostnames` to `alias`, creating the alias if needed.
    pub fn add<I, S>(&mut self, alias: &str, hostnames: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let idx = match self.entries.iter().position(|(a, _)| &**a == alias) {
            Some(i) => i,
            None => {
                self.entries.push((alias.into(), Vec::new()));
                self.entries.len() - 1
            }
        };
        let hosts = &mut self.entries[idx].1;
        hosts.extend(hostnames.into_iter().map(|h| h.as_ref().into()));
        self
    }

    pub fn resolve(&self, hostname: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, hosts)| hosts.iter().any(|h| &**h == hostname))
            .map(|(alias, _)| &**alias)
    }

    pub fn hostnames(&self, alias: &str) -> Option<&[Box<str>]> {
        self.entries
            .iter()
            .find(|(a, _)| &**a == alias)
            .map(|(_, hosts)| &**hosts)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(a, _)| &**a)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::HostTable;

    #[test]
    fn first_alias_wins() {
        let mut hosts = HostTable::new();
        hosts
            .add("main", ["www.example.com", "example.com"])
            .add("api", ["api.example.com", "example.com"]);

        assert_eq!(hosts.resolve("example.com"), Some("main"));
        assert_eq!(hosts.resolve("api.example.com"), Some("api"));
        assert_eq!(hosts.resolve("EXAMPLE.com"), None);
        assert_eq!(hosts.resolve("other.test"), None);

        hosts.add("main", ["m.example.com"]);
        assert_eq!(hosts.resolve("m.example.com"), Some("main"));
        assert_eq!(hosts.hostnames("main").map(|h| h.len()), Some(3));
        assert_eq!(hosts.aliases().collect::<Vec<_>>(), ["main", "api"]);
    }
}

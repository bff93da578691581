use crate::strmap::StrMap;

/// Named constraint regexes, referenced from templates as `{name:@alias}`.
///
/// Each [`PatternCompiler`](super::PatternCompiler) owns its own table, so
/// two routers never see each other's aliases.
#[derive(Debug, Clone)]
pub struct ConstraintAliases {
    map: StrMap<Box<str>>,
}

impl Default for ConstraintAliases {
    fn default() -> Self {
        let mut aliases = Self::empty();
        aliases
            .insert("int", r"\d+")
            .insert("slug", r"[a-z0-9]+(?:-[a-z0-9]+)*")
            .insert(
                "uuid",
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
            )
            .insert("alpha", r"[A-Za-z]+")
            .insert("alnum", r"[A-Za-z0-9]+")
            .insert("hex", r"[0-9a-fA-F]+")
            .insert("any", r".+");
        aliases
    }
}

impl ConstraintAliases {
    /// A table without the built-in aliases.
    pub fn empty() -> Self {
        Self { map: StrMap::new() }
    }

    /// Adds or replaces an alias. `name` is given without the leading `@`.
    pub fn insert(&mut self, name: &str, regex: &str) -> &mut Self {
        self.map.insert(name.trim_start_matches('@'), regex.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.find(name).map(|s| &**s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(k, v)| (k, &**v))
    }
}

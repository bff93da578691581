//! Path templates.
//!
//! A template is literal text mixed with `{name}` placeholders:
//!
//! - `{id}` matches one or more characters other than `/`, non-greedily.
//! - `{id:\d+}` constrains the value with a regex, `{slug:@slug}` with a
//!   named alias from [`ConstraintAliases`].
//! - `[...]` is an optional group, groups nest: `/archive[/{year}[/{month}]]`.
//! - `{id?}` is shorthand for an optional group holding just the variable;
//!   a `/` right before it moves into the group, so `/users/{id?}` matches
//!   both `/users` and `/users/7`.
//!
//! Once an optional group starts, only further optional groups may follow.

mod alias;
mod parser;

pub use self::alias::ConstraintAliases;

use self::parser::{Parser, DEFAULT_CONSTRAINT};
use crate::error::{PathBuildError, PatternError};
use crate::params::Params;

use regex::Regex;

#[derive(Debug, Clone)]
pub enum Segment {
    Literal(Box<str>),
    Variable(Variable),
    Optional(Vec<Segment>),
}

#[derive(Debug, Clone)]
pub struct Variable {
    name: Box<str>,
    optional: bool,
    constraint: Option<Box<str>>,
    alias: Option<Box<str>>,
    default: Option<Box<str>>,
    validator: Regex,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the variable sits inside an optional group.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The constraint regex, after alias expansion.
    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    /// The alias the constraint was written as, without `@`.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.validator.is_match(value)
    }
}

/// Compiles templates against one alias table.
#[derive(Debug, Clone, Default)]
pub struct PatternCompiler {
    aliases: ConstraintAliases,
}

impl PatternCompiler {
    pub fn new(aliases: ConstraintAliases) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &ConstraintAliases {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut ConstraintAliases {
        &mut self.aliases
    }

    pub fn compile(&self, template: &str) -> Result<PathPattern, PatternError> {
        let (segments, names) = Parser::new(template, &self.aliases).parse()?;

        let mut src = String::with_capacity(template.len() * 2 + 2);
        src.push('^');
        render_regex(&segments, &mut src);
        src.push('$');

        let regex = Regex::new(&src).map_err(|e| PatternError::Regex {
            template: template.to_owned(),
            source: e,
        })?;

        Ok(PathPattern {
            template: template.into(),
            segments,
            names,
            regex,
        })
    }
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: Box<str>,
    segments: Vec<Segment>,
    names: Vec<Box<str>>,
    regex: Regex,
}

impl PathPattern {
    /// Compiles `template` with the built-in aliases.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        PatternCompiler::default().compile(template)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Variable names in template order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|n| &**n)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        find_variable(&self.segments, name)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches the whole of `path`. Variables in omitted optional groups
    /// are absent from the result.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let mut params = Params::new();
        for name in &self.names {
            if let Some(m) = caps.name(name) {
                params.push(name, m.as_str());
            }
        }
        Some(params)
    }

    /// Substitutes `values` into the template.
    ///
    /// Missing variables fall back to their default. An optional group is
    /// emitted only when a variable inside it was given explicitly. In
    /// `strict` mode every substituted value must satisfy its constraint.
    pub fn build<I, K, V>(&self, values: I, strict: bool) -> Result<String, PathBuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let values: Params = values.into_iter().collect();
        let mut out = String::with_capacity(self.template.len());
        build_into(&self.segments, &values, strict, &mut out)?;
        Ok(out)
    }

    /// Sets the default value of variable `name`. Returns `false` if the
    /// template has no such variable.
    pub(crate) fn set_default(&mut self, name: &str, value: &str) -> bool {
        match find_variable_mut(&mut self.segments, name) {
            Some(v) => {
                v.default = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// The first path segment every matching path must start with, if the
    /// template pins it to literal text.
    pub(crate) fn leading_segment(&self) -> Option<&str> {
        let first = match self.segments.first() {
            Some(Segment::Literal(lit)) => lit,
            _ => return None,
        };
        let rest = first.strip_prefix('/')?;
        if let Some(i) = rest.find('/') {
            return Some(&rest[..i]);
        }
        let tail_starts_with_slash = self.segments[1..].iter().all(|s| match s {
            Segment::Optional(inner) => {
                matches!(inner.first(), Some(Segment::Literal(l)) if l.starts_with('/'))
            }
            _ => false,
        });
        if tail_starts_with_slash {
            Some(rest)
        } else {
            None
        }
    }
}

fn render_regex(segments: &[Segment], out: &mut String) {
    for seg in segments {
        match seg {
            Segment::Literal(lit) => out.push_str(&regex::escape(lit)),
            Segment::Variable(v) => {
                out.push_str("(?P<");
                out.push_str(&v.name);
                out.push_str(">(?:");
                out.push_str(v.constraint.as_deref().unwrap_or(DEFAULT_CONSTRAINT));
                out.push_str("))");
            }
            Segment::Optional(inner) => {
                out.push_str("(?:");
                render_regex(inner, out);
                out.push_str(")?");
            }
        }
    }
}

fn build_into(
    segments: &[Segment],
    values: &Params,
    strict: bool,
    out: &mut String,
) -> Result<(), PathBuildError> {
    for seg in segments {
        match seg {
            Segment::Literal(lit) => out.push_str(lit),
            Segment::Variable(v) => {
                let value = match values.get(&v.name).or(v.default.as_deref()) {
                    Some(value) => value,
                    None => {
                        return Err(PathBuildError::MissingVariable {
                            name: v.name.to_string(),
                        })
                    }
                };
                if strict && !v.accepts(value) {
                    return Err(PathBuildError::ConstraintViolation {
                        name: v.name.to_string(),
                        value: value.to_owned(),
                    });
                }
                out.push_str(value);
            }
            Segment::Optional(inner) => {
                if mentions_any(inner, values) {
                    build_into(inner, values, strict, out)?;
                }
            }
        }
    }
    Ok(())
}

fn mentions_any(segments: &[Segment], values: &Params) -> bool {
    segments.iter().any(|s| match s {
        Segment::Literal(_) => false,
        Segment::Variable(v) => values.contains(&v.name),
        Segment::Optional(inner) => mentions_any(inner, values),
    })
}

fn find_variable<'s>(segments: &'s [Segment], name: &str) -> Option<&'s Variable> {
    segments.iter().find_map(|s| match s {
        Segment::Literal(_) => None,
        Segment::Variable(v) => Some(v).filter(|v| &*v.name == name),
        Segment::Optional(inner) => find_variable(inner, name),
    })
}

fn find_variable_mut<'s>(segments: &'s mut [Segment], name: &str) -> Option<&'s mut Variable> {
    segments.iter_mut().find_map(|s| match s {
        Segment::Literal(_) => None,
        Segment::Variable(v) => Some(v).filter(|v| &*v.name == name),
        Segment::Optional(inner) => find_variable_mut(inner, name),
    })
}

#[cfg(test)]
mod tests {
    use super::PathPattern;

    #[test]
    fn leading_segment() {
        let cases: &[(&str, Option<&str>)] = &[
            ("/", Some("")),
            ("/users", Some("users")),
            ("/users/{id}", Some("users")),
            ("/users/{id?}", Some("users")),
            ("/users[/{id}][/{x}]", Some("users")),
            ("/users[.{fmt}]", None),
            ("/user{id}", None),
            ("/{id}", None),
            ("/{id?}", None),
            ("/a/b/c", Some("a")),
        ];
        for &(template, expected) in cases {
            let pattern = PathPattern::compile(template).unwrap();
            assert_eq!(pattern.leading_segment(), expected, "{}", template);
        }
    }
}

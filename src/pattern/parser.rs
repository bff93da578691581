use super::alias::ConstraintAliases;
use super::{Segment, Variable};
use crate::error::PatternError;

use regex::Regex;

const LBRACE: u8 = b'{';
const RBRACE: u8 = b'}';
const LBRACKET: u8 = b'[';
const RBRACKET: u8 = b']';
const SLASH: char = '/';

/// Regex for a variable without an explicit constraint.
pub(super) const DEFAULT_CONSTRAINT: &str = "[^/]+?";

pub(super) struct Parser<'t, 'a> {
    template: &'t str,
    bytes: &'t [u8],
    pos: usize,
    aliases: &'a ConstraintAliases,
    names: Vec<Box<str>>,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub(super) fn new(template: &'t str, aliases: &'a ConstraintAliases) -> Self {
        Self {
            template,
            bytes: template.as_bytes(),
            pos: 0,
            aliases,
            names: Vec::new(),
        }
    }

    pub(super) fn parse(mut self) -> Result<(Vec<Segment>, Vec<Box<str>>), PatternError> {
        if !self.template.starts_with(SLASH) {
            return Err(PatternError::MissingLeadingSlash {
                template: self.template.to_owned(),
            });
        }
        let segments = self.parse_seq(0)?;
        Ok((segments, self.names))
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, msg: &'static str) -> PatternError {
        PatternError::syntax(msg, self.template)
    }

    fn required_after_optional(&self) -> PatternError {
        PatternError::RequiredAfterOptional {
            template: self.template.to_owned(),
        }
    }

    fn parse_seq(&mut self, depth: usize) -> Result<Vec<Segment>, PatternError> {
        let mut out: Vec<Segment> = Vec::new();
        let mut lit = String::new();
        let mut seen_optional = false;

        loop {
            match self.peek() {
                None => {
                    if depth > 0 {
                        return Err(self.error("unclosed '['"));
                    }
                    break;
                }
                Some(RBRACKET) => {
                    if depth == 0 {
                        return Err(self.error("unbalanced ']'"));
                    }
                    self.pos += 1;
                    break;
                }
                Some(RBRACE) => return Err(self.error("unbalanced '}'")),
                Some(LBRACKET) => {
                    self.pos += 1;
                    flush(&mut lit, &mut out);
                    let inner = self.parse_seq(depth + 1)?;
                    if inner.is_empty() {
                        return Err(self.error("optional group can not be empty"));
                    }
                    out.push(Segment::Optional(inner));
                    seen_optional = true;
                }
                Some(LBRACE) => {
                    let (mut var, marked_optional) = self.parse_variable()?;
                    if marked_optional {
                        var.optional = true;
                        let mut group = Vec::with_capacity(2);
                        // The root slash stays required: `/{x?}` matches `/`.
                        let root = depth == 0 && out.is_empty() && lit.len() == 1;
                        if lit.ends_with(SLASH) && !root {
                            lit.pop();
                            group.push(Segment::Literal("/".into()));
                        }
                        flush(&mut lit, &mut out);
                        group.push(Segment::Variable(var));
                        out.push(Segment::Optional(group));
                        seen_optional = true;
                    } else {
                        if seen_optional {
                            return Err(self.required_after_optional());
                        }
                        var.optional = depth > 0;
                        flush(&mut lit, &mut out);
                        out.push(Segment::Variable(var));
                    }
                }
                Some(_) => {
                    if seen_optional {
                        return Err(self.required_after_optional());
                    }
                    let start = self.pos;
                    while let Some(b) = self.peek() {
                        if matches!(b, LBRACE | RBRACE | LBRACKET | RBRACKET) {
                            break;
                        }
                        self.pos += 1;
                    }
                    lit.push_str(&self.template[start..self.pos]);
                }
            }
        }

        flush(&mut lit, &mut out);
        Ok(out)
    }

    /// Parses `{name}`, `{name?}`, `{name:constraint}` or `{name?:constraint}`.
    fn parse_variable(&mut self) -> Result<(Variable, bool), PatternError> {
        self.pos += 1; // '{'

        let start = self.pos;
        while let Some(b) = self.peek() {
            if matches!(b, b'?' | b':' | RBRACE) {
                break;
            }
            self.pos += 1;
        }
        let name = &self.template[start..self.pos];
        if name.is_empty() {
            return Err(self.error("variable name can not be empty"));
        }
        if !is_valid_name(name) {
            return Err(PatternError::InvalidVariableName {
                name: name.to_owned(),
                template: self.template.to_owned(),
            });
        }

        let marked_optional = self.peek() == Some(b'?');
        if marked_optional {
            self.pos += 1;
        }

        let mut constraint: Option<&str> = None;
        match self.peek() {
            Some(RBRACE) => self.pos += 1,
            Some(b':') => {
                self.pos += 1;
                constraint = Some(self.read_constraint()?);
            }
            Some(_) => return Err(self.error("expected ':' or '}' after variable name")),
            None => return Err(self.error("unclosed '{'")),
        }

        if self.names.iter().any(|n| &**n == name) {
            return Err(PatternError::DuplicateVariable {
                name: name.to_owned(),
                template: self.template.to_owned(),
            });
        }
        self.names.push(name.into());

        let (source, alias): (Option<Box<str>>, Option<Box<str>>) = match constraint {
            None => (None, None),
            Some(c) if c.starts_with('@') => {
                let alias = &c[1..];
                match self.aliases.get(alias) {
                    Some(regex) => (Some(regex.into()), Some(alias.into())),
                    None => {
                        return Err(PatternError::UnknownAlias {
                            alias: alias.to_owned(),
                            template: self.template.to_owned(),
                        })
                    }
                }
            }
            Some(c) => (Some(c.into()), None),
        };

        if let Some(src) = source.as_deref() {
            check_constraint(src).map_err(|msg| PatternError::UnsupportedConstraint {
                name: name.to_owned(),
                msg,
                template: self.template.to_owned(),
            })?;
        }

        let validator = {
            let src = source.as_deref().unwrap_or("[^/]+");
            Regex::new(&format!("^(?:{})$", src)).map_err(|e| PatternError::InvalidConstraint {
                name: name.to_owned(),
                source: e,
            })?
        };

        let var = Variable {
            name: name.into(),
            optional: false,
            constraint: source,
            alias,
            default: None,
            validator,
        };
        Ok((var, marked_optional))
    }

    /// Reads a constraint up to the closing brace, honoring nested braces
    /// and backslash escapes. Consumes the closing brace.
    fn read_constraint(&mut self) -> Result<&'t str, PatternError> {
        let start = self.pos;
        let mut depth: usize = 0;
        loop {
            match self.peek() {
                None => return Err(self.error("unclosed '{'")),
                Some(b'\\') => {
                    self.pos += 1;
                    if let Some(c) = self.template[self.pos..].chars().next() {
                        self.pos += c.len_utf8();
                    }
                }
                Some(LBRACE) => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(RBRACE) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        let constraint = &self.template[start..self.pos];
        self.pos += 1; // '}'
        if constraint.is_empty() {
            return Err(self.error("constraint can not be empty"));
        }
        Ok(constraint)
    }
}

fn flush(lit: &mut String, out: &mut Vec<Segment>) {
    if !lit.is_empty() {
        out.push(Segment::Literal(std::mem::take(lit).into()));
    }
}

/// Constraints are embedded in the route regex, so they must not anchor
/// or capture by name.
fn check_constraint(src: &str) -> Result<(), &'static str> {
    const ANCHOR: &str = "anchors are not allowed";
    const NAMED_GROUP: &str = "named groups are not allowed";

    let bytes = src.as_bytes();
    let mut class_depth: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                if matches!(bytes.get(i + 1), Some(b'A') | Some(b'z')) {
                    return Err(ANCHOR);
                }
                i += 2;
                continue;
            }
            b'[' => {
                class_depth += 1;
                if class_depth == 1 {
                    // `[]...]` and `[^]...]` start with a literal `]`
                    if bytes.get(i + 1) == Some(&b'^') {
                        i += 1;
                    }
                    if bytes.get(i + 1) == Some(&b']') {
                        i += 1;
                    }
                }
            }
            b']' if class_depth > 0 => class_depth -= 1,
            b'^' | b'$' if class_depth == 0 => return Err(ANCHOR),
            b'(' if class_depth == 0 => {
                let rest = &src[i..];
                if rest.starts_with("(?P<") || rest.starts_with("(?<") {
                    return Err(NAMED_GROUP);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

use std::fmt;

use smallvec::SmallVec;

/// An insertion-ordered set of uppercase HTTP method tokens.
#[derive(Debug, Default, Clone)]
pub struct MethodSet {
    buf: SmallVec<[Box<str>; 4]>,
}

impl MethodSet {
    pub fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    /// Inserts `method` uppercased. Returns `false` if it was already present.
    pub fn insert(&mut self, method: &str) -> bool {
        if self.contains(method) {
            return false;
        }
        self.buf.push(method.to_ascii_uppercase().into());
        true
    }

    /// ASCII case-insensitive membership test.
    pub fn contains(&self, method: &str) -> bool {
        self.buf.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    pub fn union_with(&mut self, other: &MethodSet) {
        for m in other.iter() {
            self.insert(m);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.buf.iter().map(|m| &**m)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl PartialEq for MethodSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|m| other.contains(m))
    }
}

impl Eq for MethodSet {}

impl<S: AsRef<str>> FromIterator<S> for MethodSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for MethodSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for m in iter {
            self.insert(m.as_ref());
        }
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.buf.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(m)?;
        }
        Ok(())
    }
}

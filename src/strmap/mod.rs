use std::cmp::Ordering;

/// A small map keyed by strings, stored as two sorted parallel vectors.
#[derive(Debug, Clone)]
pub struct StrMap<T> {
    keys: Vec<Box<str>>,
    values: Vec<T>,
}

impl<T> Default for StrMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StrMap<T> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        match self.find_index(key) {
            Ok(i) => self.values.get(i),
            Err(_) => None,
        }
    }

    pub fn find_mut_with(&mut self, key: &str, f: impl FnOnce() -> T) -> &mut T {
        let i = match self.find_index(key) {
            Ok(i) => i,
            Err(i) => {
                self.values.insert(i, f());
                self.keys.insert(i, key.into());
                i
            }
        };
        &mut self.values[i]
    }

    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        match self.find_index(key) {
            Ok(i) => Some(std::mem::replace(&mut self.values[i], value)),
            Err(i) => {
                self.values.insert(i, value);
                self.keys.insert(i, key.into());
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.keys.iter().map(|k| &**k).zip(self.values.iter())
    }

    fn find_index(&self, key: &str) -> Result<usize, usize> {
        let keys: &[Box<str>] = &self.keys;

        let mut l: usize = 0;
        let mut r: usize = keys.len();

        while l < r {
            let mid = l + (r - l) / 2;
            match (*keys[mid]).cmp(key) {
                Ordering::Less => l = mid + 1,
                Ordering::Equal => return Ok(mid),
                Ordering::Greater => r = mid,
            }
        }
        Err(l)
    }
}

#[cfg(test)]
mod tests {
    use super::StrMap;

    #[test]
    fn sorted_insert_and_find() {
        let mut map: StrMap<usize> = StrMap::new();
        for (i, k) in ["users", "api", "posts", "", "zz"].iter().enumerate() {
            assert!(map.insert(k, i).is_none());
        }
        assert_eq!(map.iter().count(), 5);
        assert_eq!(map.find("api"), Some(&1));
        assert_eq!(map.find(""), Some(&3));
        assert_eq!(map.find("nope"), None);
        assert_eq!(map.insert("api", 9), Some(1));

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["", "api", "posts", "users", "zz"]);

        map.find_mut_with("new", || 7);
        *map.find_mut_with("new", || 0) += 1;
        assert_eq!(map.find("new"), Some(&8));
    }
}

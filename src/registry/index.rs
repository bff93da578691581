use crate::strmap::StrMap;

/// Routes of one host bucket, keyed by the literal first path segment
/// their template pins down. Positions are registry entry ids, which grow
/// with registration order, so every list here is sorted.
#[derive(Debug, Default)]
pub(super) struct SegmentIndex {
    by_segment: StrMap<Vec<usize>>,
    unpinned: Vec<usize>,
}

impl SegmentIndex {
    pub(super) fn insert(&mut self, id: usize, leading: Option<&str>) {
        match leading {
            Some(seg) => self.by_segment.find_mut_with(seg, Vec::new).push(id),
            None => self.unpinned.push(id),
        }
    }

    /// Ids that may match a path whose first segment is `segment`, in
    /// registration order.
    pub(super) fn candidates<'a>(&'a self, segment: &str) -> Merge<'a> {
        let pinned: &[usize] = match self.by_segment.find(segment) {
            Some(ids) => ids,
            None => &[],
        };
        Merge {
            lhs: pinned,
            rhs: &self.unpinned,
        }
    }
}

/// Merges two ascending id lists.
pub(super) struct Merge<'a> {
    lhs: &'a [usize],
    rhs: &'a [usize],
}

impl<'a> Iterator for Merge<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let take_lhs = match (self.lhs.first(), self.rhs.first()) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(l), Some(r)) => l < r,
        };
        let side = if take_lhs {
            &mut self.lhs
        } else {
            &mut self.rhs
        };
        let cur: &'a [usize] = *side;
        let (&id, rest) = cur.split_first()?;
        *side = rest;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.lhs.len() + self.rhs.len();
        (n, Some(n))
    }
}

/// The first segment of a request path: `/users/7` gives `users`.
pub(super) fn first_segment(path: &str) -> &str {
    let path = trim_first_slash(path);
    match path.find('/') {
        Some(i) => &path[..i],
        None => path,
    }
}

#[inline(always)]
fn trim_first_slash(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}

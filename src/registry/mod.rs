mod index;
mod matcher;

pub use self::matcher::RouteMatch;

use self::index::{first_segment, SegmentIndex};
use crate::error::{DuplicateRouteError, RouteNotFoundError};
use crate::host::HostTable;
use crate::method::MethodSet;
use crate::route::{Route, WILDCARD_HOST};
use crate::strmap::StrMap;

use std::sync::Arc;

use smallvec::SmallVec;

/// Indexed collection of routes, bucketed by host-key.
///
/// `T` is the payload stored next to each route; the [`Router`](crate::Router)
/// keeps its handler and middleware there.
#[derive(Debug)]
pub struct RouteRegistry<T> {
    hosts: HostTable,
    entries: Vec<Registered<T>>,
    buckets: Vec<Bucket>,
    bucket_ids: StrMap<usize>,
    prefilter: bool,
}

#[derive(Debug)]
pub struct Registered<T> {
    route: Arc<Route>,
    data: T,
}

impl<T> Registered<T> {
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

#[derive(Debug)]
struct Bucket {
    names: StrMap<usize>,
    order: Vec<usize>,
    index: SegmentIndex,
}

impl<T> Default for RouteRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteRegistry<T> {
    pub fn new() -> Self {
        Self::with_hosts(HostTable::new())
    }

    pub fn with_hosts(hosts: HostTable) -> Self {
        Self {
            hosts,
            entries: Vec::new(),
            buckets: Vec::new(),
            bucket_ids: StrMap::new(),
            prefilter: true,
        }
    }

    pub fn hosts(&self) -> &HostTable {
        &self.hosts
    }

    pub fn hosts_mut(&mut self) -> &mut HostTable {
        &mut self.hosts
    }

    /// Turns the first-segment index on or off. Match results are the same
    /// either way.
    pub fn set_prefilter(&mut self, enabled: bool) -> &mut Self {
        self.prefilter = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, route: Route, data: T) -> Result<(), DuplicateRouteError> {
        let host_key = route.host_key();
        if let Some(&b) = self.bucket_ids.find(host_key) {
            if self.buckets[b].names.find(route.name()).is_some() {
                return Err(DuplicateRouteError {
                    host_key: host_key.to_owned(),
                    name: route.name().to_owned(),
                });
            }
        }

        let id = self.entries.len();
        let b = match self.bucket_ids.find(host_key) {
            Some(&b) => b,
            None => {
                let b = self.buckets.len();
                self.buckets.push(Bucket {
                    names: StrMap::new(),
                    order: Vec::new(),
                    index: SegmentIndex::default(),
                });
                self.bucket_ids.insert(host_key, b);
                b
            }
        };

        let bucket = &mut self.buckets[b];
        bucket.names.insert(route.name(), id);
        bucket.order.push(id);
        bucket.index.insert(id, route.pattern().leading_segment());

        tracing::debug!(
            route = route.name(),
            host = host_key,
            path = route.path(),
            methods = %route.methods(),
            "route registered"
        );

        self.entries.push(Registered {
            route: Arc::new(route),
            data,
        });
        Ok(())
    }

    /// Looks `name` up in every bucket, oldest bucket first.
    pub fn get(&self, name: &str) -> Result<&Registered<T>, RouteNotFoundError> {
        self.buckets
            .iter()
            .find_map(|b| b.names.find(name))
            .map(|&id| &self.entries[id])
            .ok_or_else(|| RouteNotFoundError::Name {
                name: name.to_owned(),
            })
    }

    /// Exact bucket lookup. `host_key` is a host alias, a literal hostname
    /// or `"*"`.
    pub fn get_by_host_and_name(
        &self,
        host_key: &str,
        name: &str,
    ) -> Result<&Registered<T>, RouteNotFoundError> {
        self.bucket(host_key)
            .and_then(|b| b.names.find(name))
            .map(|&id| &self.entries[id])
            .ok_or_else(|| RouteNotFoundError::HostName {
                host_key: host_key.to_owned(),
                name: name.to_owned(),
            })
    }

    /// Every route in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registered<T>> + '_ {
        self.entries.iter()
    }

    /// Routes bound to `host` (through its alias, then the literal name),
    /// followed by the host-agnostic ones.
    pub fn routes_for_host<'a>(&'a self, host: &str) -> impl Iterator<Item = &'a Registered<T>> {
        self.host_buckets(host)
            .into_iter()
            .flat_map(move |b| b.order.iter().map(move |&id| &self.entries[id]))
    }

    /// Union of the methods of [`routes_for_host`](Self::routes_for_host).
    pub fn allowed_methods(&self, host: &str) -> MethodSet {
        let mut methods = MethodSet::new();
        for r in self.routes_for_host(host) {
            methods.union_with(r.route.methods());
        }
        methods
    }

    /// The routes that can structurally match `path` on `host`, in match
    /// priority order.
    pub(crate) fn candidates<'a>(
        &'a self,
        host: &str,
        path: &str,
    ) -> Box<dyn Iterator<Item = &'a Registered<T>> + 'a> {
        let buckets = self.host_buckets(host);
        if !self.prefilter {
            return Box::new(
                buckets
                    .into_iter()
                    .flat_map(move |b| b.order.iter().map(move |&id| &self.entries[id])),
            );
        }
        let segment: Box<str> = first_segment(path).into();
        Box::new(buckets.into_iter().flat_map(move |b| {
            b.index
                .candidates(&segment)
                .map(move |id| &self.entries[id])
                .collect::<SmallVec<[&'a Registered<T>; 8]>>()
        }))
    }

    pub(crate) fn route_mut(&mut self, name: &str) -> Option<&mut Arc<Route>> {
        let id = *self.buckets.iter().find_map(|b| b.names.find(name))?;
        Some(&mut self.entries[id].route)
    }

    fn bucket(&self, host_key: &str) -> Option<&Bucket> {
        self.bucket_ids.find(host_key).map(|&b| &self.buckets[b])
    }

    fn host_buckets(&self, host: &str) -> SmallVec<[&Bucket; 3]> {
        let mut ids: SmallVec<[usize; 3]> = SmallVec::new();
        let mut push = |key: &str| {
            if let Some(&b) = self.bucket_ids.find(key) {
                if !ids.contains(&b) {
                    ids.push(b);
                }
            }
        };
        if let Some(alias) = self.hosts.resolve(host) {
            push(alias);
        }
        push(host);
        push(WILDCARD_HOST);
        ids.into_iter().map(|b| &self.buckets[b]).collect()
    }
}

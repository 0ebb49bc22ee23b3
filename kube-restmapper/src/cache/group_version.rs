use crate::{discovery::Discover, error::Error, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube_restmapper_core::{GroupVersion, RestMapping, Scope};
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};
use tokio::sync::Mutex;

/// What is cached per kind
#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedResource {
    resource: String,
    scope: Scope,
}

/// Kinds and resources served at a single group version
///
/// `kinds` and `to_kind` are built together from the same resources.
/// Every served resource maps to its kind, but when several resources share a kind,
/// `kinds` only keeps the one listed last.
/// Subresources (`pods/status`) are never part of either.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GroupVersionResources {
    kinds: HashMap<String, CachedResource>,
    to_kind: HashMap<String, String>,
}

impl GroupVersionResources {
    fn from_list(list: &APIResourceList) -> Self {
        let mut resources = Self::default();
        for res in &list.resources {
            // skip subresources
            if res.name.contains('/') {
                continue;
            }
            resources.kinds.insert(res.kind.clone(), CachedResource {
                resource: res.name.clone(),
                scope: Scope::from_namespaced(res.namespaced),
            });
            resources.to_kind.insert(res.name.clone(), res.kind.clone());
        }
        resources
    }

    /// Kind served under a plural resource name
    ///
    /// A resource listed with an empty kind counts as unmapped.
    pub fn kind(&self, resource: &str) -> Option<&str> {
        self.to_kind
            .get(resource)
            .map(String::as_str)
            .filter(|kind| !kind.is_empty())
    }

    /// Plural resource name and scope of a kind
    pub fn resource(&self, kind: &str) -> Option<(&str, Scope)> {
        self.kinds.get(kind).map(|c| (c.resource.as_str(), c.scope))
    }

    /// All kinds served, in no particular order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Whether nothing is served
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Lazily populated resource information for one group version
pub(crate) struct CachedGroupVersion {
    gv: GroupVersion,
    /// Held across the discovery call so only one is in flight
    fetch_lock: Mutex<()>,
    /// Set once on the first successful discovery, never replaced
    resources: OnceLock<Arc<GroupVersionResources>>,
}

impl CachedGroupVersion {
    pub(crate) fn new(gv: GroupVersion) -> Self {
        Self {
            gv,
            fetch_lock: Mutex::new(()),
            resources: OnceLock::new(),
        }
    }

    /// The populated resources, without ever calling discovery
    pub(crate) fn populated(&self) -> Option<&GroupVersionResources> {
        self.resources.get().map(Arc::as_ref)
    }

    /// Returns the resources of this group version, querying discovery if not cached
    ///
    /// A group version the server does not serve comes back empty and is not cached,
    /// so it is picked up once it starts being served.
    pub(crate) async fn fetch<D>(&self, discovery: &D) -> Result<Arc<GroupVersionResources>>
    where
        D: Discover + ?Sized,
    {
        if let Some(cached) = self.resources.get() {
            return Ok(cached.clone());
        }
        let _fetching = self.fetch_lock.lock().await;
        // whoever held the lock before us may have populated it
        if let Some(cached) = self.resources.get() {
            return Ok(cached.clone());
        }

        let gv = self.gv.api_version();
        tracing::debug!(gv = %gv, "discovering server resources for group/version");
        match discovery.server_resources_for_group_version(&gv).await {
            Ok(list) => {
                let resources = Arc::new(GroupVersionResources::from_list(&list));
                // only the fetch_lock holder sets this, and it was empty above
                let _ = self.resources.set(resources.clone());
                Ok(resources)
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(gv = %gv, "group/version not served: {err}");
                Ok(Arc::default())
            }
            Err(source) => {
                tracing::warn!(gv = %gv, "unexpected error from ServerResourcesForGroupVersion: {source}");
                Err(Error::ServerResources {
                    group_version: gv,
                    source,
                })
            }
        }
    }

    /// Returns the mapping for `kind` in this group version, querying discovery if not cached
    pub(crate) async fn find_rest_mapping<D>(&self, discovery: &D, kind: &str) -> Result<Option<RestMapping>>
    where
        D: Discover + ?Sized,
    {
        let resources = self.fetch(discovery).await?;
        Ok(resources.resource(kind).map(|(resource, scope)| RestMapping {
            resource: self.gv.with_resource(resource),
            group_version_kind: self.gv.with_kind(kind),
            scope,
        }))
    }
}

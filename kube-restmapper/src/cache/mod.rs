//! In-memory cache of api discovery results.
//!
//! The cache is populated lazily by the lookups themselves and never expires:
//! a successful discovery answer is kept for the lifetime of the [`DiscoveryCache`],
//! a failed one is not kept at all, so the next lookup asks again.
use crate::{discovery::Discover, error::Error, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIGroup;
use kube_restmapper_core::{GroupVersion, GroupVersionResource, RestMapping};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

mod group_version;
use group_version::CachedGroupVersion;
pub use group_version::GroupVersionResources;

/// A cache of schema information in front of a [`Discover`] implementation
///
/// Construction does no I/O. Share it between callers by wrapping it in an [`Arc`];
/// there is no teardown, the cached state lives as long as the cache.
///
/// Locking happens at two levels:
/// - a short-lived lock over the set of known group versions, never held across discovery
/// - one async lock per group version, held across the discovery call for that group version,
///   so concurrent lookups of the same group version cause a single request
///
/// The group list has its own async lock with the same single request guarantee.
#[derive(Default)]
pub struct DiscoveryCache {
    groups: tokio::sync::Mutex<Option<HashMap<String, APIGroup>>>,
    group_versions: Mutex<HashMap<GroupVersion, Arc<CachedGroupVersion>>>,
}

impl DiscoveryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the [`APIGroup`] for the specified group, querying discovery if not cached
    ///
    /// The core group is the empty string.
    /// Returns `Ok(None)` when the server does not serve the group.
    pub async fn find_group_info<D>(&self, discovery: &D, group: &str) -> Result<Option<APIGroup>>
    where
        D: Discover + ?Sized,
    {
        let mut groups = self.groups.lock().await;
        if groups.is_none() {
            tracing::debug!("discovering server groups");
            let list = discovery.server_groups().await.map_err(|err| {
                tracing::warn!("unexpected error from ServerGroups: {err}");
                Error::ServerGroups(err)
            })?;
            let by_name = list
                .groups
                .into_iter()
                .map(|g| (g.name.clone(), g))
                .collect::<HashMap<_, _>>();
            *groups = Some(by_name);
        }
        Ok(groups.as_ref().and_then(|groups| groups.get(group)).cloned())
    }

    /// Returns the [`RestMapping`] for a kind at a group version, querying discovery if not cached
    ///
    /// Returns `Ok(None)` if the group version does not serve the kind,
    /// or if the group version is not served at all.
    pub async fn find_rest_mapping<D>(
        &self,
        discovery: &D,
        gv: &GroupVersion,
        kind: &str,
    ) -> Result<Option<RestMapping>>
    where
        D: Discover + ?Sized,
    {
        self.group_version(gv).find_rest_mapping(discovery, kind).await
    }

    /// Returns everything served at a group version, querying discovery if not cached
    ///
    /// An unserved group version comes back empty.
    pub async fn group_version_resources<D>(
        &self,
        discovery: &D,
        gv: &GroupVersion,
    ) -> Result<Arc<GroupVersionResources>>
    where
        D: Discover + ?Sized,
    {
        self.group_version(gv).fetch(discovery).await
    }

    /// Finds the kind for a resource among the group versions discovered so far
    ///
    /// This never queries discovery.
    /// With a version set, only that group version is consulted.
    /// Without one, every cached group version of the group is scanned and the first one
    /// mapping the resource wins; which one that is depends on what has been discovered and
    /// on map iteration order, so it is unspecified when several versions serve the resource.
    pub fn kind_from_resource(&self, gvr: &GroupVersionResource) -> Option<String> {
        let group_versions = self.group_versions.lock();
        if gvr.has_version() {
            return group_versions
                .get(&gvr.group_version())?
                .populated()?
                .kind(&gvr.resource)
                .map(str::to_string);
        }
        group_versions
            .iter()
            .filter(|(gv, _)| gv.group == gvr.group)
            .find_map(|(_, cached)| cached.populated()?.kind(&gvr.resource).map(str::to_string))
    }

    /// Find or create the entry for a group version, without doing any I/O
    fn group_version(&self, gv: &GroupVersion) -> Arc<CachedGroupVersion> {
        let mut group_versions = self.group_versions.lock();
        if let Some(cached) = group_versions.get(gv) {
            return cached.clone();
        }
        let cached = Arc::new(CachedGroupVersion::new(gv.clone()));
        group_versions.insert(gv.clone(), cached.clone());
        cached
    }
}

impl std::fmt::Debug for DiscoveryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryCache")
            .field("group_versions", &self.group_versions.lock().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

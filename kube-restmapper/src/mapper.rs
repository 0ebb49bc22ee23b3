use crate::{cache::DiscoveryCache, discovery::Discover, error::Error, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIGroup;
use kube_restmapper_core::{GroupKind, GroupVersion, GroupVersionKind, GroupVersionResource, RestMapping};
use std::sync::Arc;

/// Resolves kinds and resources against api discovery, caching every answer
///
/// Lookups go through a [`DiscoveryCache`], which can be shared between mappers
/// (and therefore between discovery clients pointing at the same server) via [`RestMapper::with_cache`].
///
/// ```no_run
/// use kube_restmapper::{core::GroupKind, Discover, RestMapper};
/// # async fn scope(discovery: impl Discover) -> Result<(), Box<dyn std::error::Error>> {
/// let mapper = RestMapper::new(discovery);
/// let mapping = mapper.rest_mapping(&GroupKind::gk("apps", "Deployment"), &[]).await?;
/// println!("{} is served as {}", mapping.group_version_kind.kind, mapping.resource.resource);
/// # Ok(())
/// # }
/// ```
pub struct RestMapper<D> {
    discovery: D,
    cache: Arc<DiscoveryCache>,
}

impl<D: Discover> RestMapper<D> {
    /// Create a mapper with its own empty cache
    #[must_use]
    pub fn new(discovery: D) -> Self {
        Self::with_cache(discovery, Arc::new(DiscoveryCache::new()))
    }

    /// Create a mapper on top of an existing cache
    #[must_use]
    pub fn with_cache(discovery: D, cache: Arc<DiscoveryCache>) -> Self {
        Self { discovery, cache }
    }

    /// The cache behind this mapper
    pub fn cache(&self) -> &Arc<DiscoveryCache> {
        &self.cache
    }

    /// Returns the [`APIGroup`] for a group if it is served
    pub async fn find_group_info(&self, group: &str) -> Result<Option<APIGroup>> {
        self.cache.find_group_info(&self.discovery, group).await
    }

    /// Returns the [`RestMapping`] for a fully qualified kind if it is served
    pub async fn find_rest_mapping(&self, gvk: &GroupVersionKind) -> Result<Option<RestMapping>> {
        self.cache
            .find_rest_mapping(&self.discovery, &gvk.group_version(), &gvk.kind)
            .await
    }

    /// Finds the kind for a resource among what has been discovered so far
    ///
    /// See [`DiscoveryCache::kind_from_resource`]; this never queries discovery.
    pub fn kind_from_resource(&self, gvr: &GroupVersionResource) -> Option<String> {
        self.cache.kind_from_resource(gvr)
    }

    /// Returns the [`RestMapping`] for a kind in the first version serving it
    ///
    /// `versions` are tried in order. When empty, the group's preferred version is tried first,
    /// followed by the other served versions in the order the server lists them.
    pub async fn rest_mapping(&self, gk: &GroupKind, versions: &[&str]) -> Result<RestMapping> {
        let versions = self.candidate_versions(&gk.group, versions).await?;
        for version in &versions {
            let gv = GroupVersion::gv(&gk.group, version);
            if let Some(mapping) = self.cache.find_rest_mapping(&self.discovery, &gv, &gk.kind).await? {
                return Ok(mapping);
            }
        }
        Err(no_kind_match(gk, versions))
    }

    /// Returns the [`RestMapping`]s for a kind in every version serving it
    ///
    /// Versions are picked like in [`RestMapper::rest_mapping`], and so is the order of the result.
    pub async fn rest_mappings(&self, gk: &GroupKind, versions: &[&str]) -> Result<Vec<RestMapping>> {
        let versions = self.candidate_versions(&gk.group, versions).await?;
        let mut mappings = vec![];
        for version in &versions {
            let gv = GroupVersion::gv(&gk.group, version);
            if let Some(mapping) = self.cache.find_rest_mapping(&self.discovery, &gv, &gk.kind).await? {
                mappings.push(mapping);
            }
        }
        if mappings.is_empty() {
            return Err(no_kind_match(gk, versions));
        }
        Ok(mappings)
    }

    /// Resolves the kind served under a resource, querying discovery if needed
    ///
    /// Unlike [`RestMapper::kind_from_resource`] this populates the cache, and without a version
    /// it walks the group's versions in preference order, so the answer is deterministic.
    pub async fn kind_for(&self, gvr: &GroupVersionResource) -> Result<GroupVersionKind> {
        let versions = if gvr.has_version() {
            vec![gvr.version.clone()]
        } else {
            self.candidate_versions(&gvr.group, &[]).await?
        };
        for version in &versions {
            let gv = GroupVersion::gv(&gvr.group, version);
            let resources = self.cache.group_version_resources(&self.discovery, &gv).await?;
            if let Some(kind) = resources.kind(&gvr.resource) {
                return Ok(gv.with_kind(kind));
            }
        }
        Err(Error::NoResourceMatch {
            group: gvr.group.clone(),
            resource: gvr.resource.clone(),
            searched_versions: versions,
        })
    }

    /// Versions to search, in order
    ///
    /// Explicit versions are used as given. Otherwise the preferred version comes first,
    /// then the remaining served versions. An unserved group has nothing to search.
    async fn candidate_versions(&self, group: &str, versions: &[&str]) -> Result<Vec<String>> {
        if !versions.is_empty() {
            return Ok(versions.iter().map(ToString::to_string).collect());
        }
        let Some(info) = self.find_group_info(group).await? else {
            return Ok(vec![]);
        };
        let mut candidates: Vec<String> = info.preferred_version.into_iter().map(|p| p.version).collect();
        for served in info.versions {
            if !candidates.contains(&served.version) {
                candidates.push(served.version);
            }
        }
        Ok(candidates)
    }
}

fn no_kind_match(gk: &GroupKind, searched_versions: Vec<String>) -> Error {
    Error::NoKindMatch {
        group: gk.group.clone(),
        kind: gk.kind.clone(),
        searched_versions,
    }
}

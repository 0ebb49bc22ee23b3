//! The discovery collaborator the cache sits in front of.
use crate::error::DiscoveryError;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIGroupList, APIResourceList};
use std::sync::Arc;

/// Source of truth for what the api server serves
///
/// Implementations are expected to be cheap to call concurrently; the cache makes sure
/// at most one call per group version (and one for the group list) is in flight.
///
/// A group version the server does not serve must be reported as a [`DiscoveryError`]
/// for which [`DiscoveryError::is_not_found`] is true.
#[async_trait]
pub trait Discover: Send + Sync {
    /// Lists every api group served, with its versions and preferred version.
    async fn server_groups(&self) -> Result<APIGroupList, DiscoveryError>;

    /// Lists the resources served at a group version.
    ///
    /// `group_version` is in discovery form: `v1` for the core group, `apps/v1` otherwise.
    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList, DiscoveryError>;
}

#[async_trait]
impl<D: Discover + ?Sized> Discover for &D {
    async fn server_groups(&self) -> Result<APIGroupList, DiscoveryError> {
        (**self).server_groups().await
    }

    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList, DiscoveryError> {
        (**self).server_resources_for_group_version(group_version).await
    }
}

#[async_trait]
impl<D: Discover + ?Sized> Discover for Arc<D> {
    async fn server_groups(&self) -> Result<APIGroupList, DiscoveryError> {
        (**self).server_groups().await
    }

    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList, DiscoveryError> {
        (**self).server_resources_for_group_version(group_version).await
    }
}

#[async_trait]
impl<D: Discover + ?Sized> Discover for Box<D> {
    async fn server_groups(&self) -> Result<APIGroupList, DiscoveryError> {
        (**self).server_groups().await
    }

    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList, DiscoveryError> {
        (**self).server_resources_for_group_version(group_version).await
    }
}

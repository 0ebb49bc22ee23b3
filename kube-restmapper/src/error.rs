//! Error handling in [`kube_restmapper`][crate]
use thiserror::Error;

pub use kube_restmapper_core::ErrorResponse;

/// Possible errors when resolving mappings
#[derive(Error, Debug)]
pub enum Error {
    /// Listing the served api groups failed
    ///
    /// Nothing is cached, the next lookup lists the groups again.
    #[error("error from ServerGroups: {0}")]
    ServerGroups(#[source] DiscoveryError),

    /// Listing the resources of a group version failed for a reason other than it being absent
    ///
    /// Nothing is cached, the next lookup for this group version queries discovery again.
    #[error("error from ServerResourcesForGroupVersion({group_version}): {source}")]
    ServerResources {
        /// The group version in its discovery form, e.g. `apps/v1`
        group_version: String,
        /// What discovery returned
        #[source]
        source: DiscoveryError,
    },

    /// None of the searched versions of a group serve the kind
    #[error("no matches for kind {kind:?} in group {group:?} (searched versions: {searched_versions:?})")]
    NoKindMatch {
        /// Requested group
        group: String,
        /// Requested kind
        kind: String,
        /// Versions that were looked at, in order
        searched_versions: Vec<String>,
    },

    /// None of the searched versions of a group serve the resource
    #[error("no matches for resource {resource:?} in group {group:?} (searched versions: {searched_versions:?})")]
    NoResourceMatch {
        /// Requested group
        group: String,
        /// Requested plural resource name
        resource: String,
        /// Versions that were looked at, in order
        searched_versions: Vec<String>,
    },
}

/// Failures reported by a [`Discover`](crate::Discover) implementation
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The server does not serve the requested group version
    #[error("group version not served: {0}")]
    NotFound(String),

    /// The server answered with an error status
    #[error("ApiError: {0} ({0:?})")]
    Api(#[source] ErrorResponse),

    /// Any other transport or service failure
    #[error("ServiceError: {0}")]
    Service(#[source] tower::BoxError),
}

impl DiscoveryError {
    /// Whether this means "nothing is served here" rather than a real failure
    ///
    /// Mappers treat these as empty results.
    pub fn is_not_found(&self) -> bool {
        match self {
            DiscoveryError::NotFound(_) => true,
            DiscoveryError::Api(status) => status.is_not_found(),
            DiscoveryError::Service(_) => false,
        }
    }
}

impl From<ErrorResponse> for DiscoveryError {
    fn from(status: ErrorResponse) -> Self {
        DiscoveryError::Api(status)
    }
}

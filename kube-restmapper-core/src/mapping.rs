//! Resolved REST mappings
use crate::gvk::{GroupVersionKind, GroupVersionResource};
use serde::{Deserialize, Serialize};

/// Resource scope
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Scope {
    /// Objects are global
    Cluster,
    /// Each object lives in namespace.
    Namespaced,
}

impl Scope {
    /// Scope from the `namespaced` flag of a discovered resource
    pub fn from_namespaced(namespaced: bool) -> Self {
        if namespaced {
            Scope::Namespaced
        } else {
            Scope::Cluster
        }
    }

    /// Whether objects live in a namespace
    pub fn is_namespaced(&self) -> bool {
        matches!(self, Scope::Namespaced)
    }
}

/// Everything needed to address instances of a kind on the server
///
/// Produced by resolving a [`GroupVersionKind`] against discovery.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct RestMapping {
    /// Fully qualified plural resource
    pub resource: GroupVersionResource,
    /// Fully qualified kind
    pub group_version_kind: GroupVersionKind,
    /// Whether instances are namespaced
    pub scope: Scope,
}

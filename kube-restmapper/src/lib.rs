//! Caching REST mapper for Kubernetes api discovery
//!
//! Resolves group/version/kind and group/version/resource identifiers into [`RestMapping`]s
//! (plural resource, kind, and [`Scope`]) by asking api discovery, and caches what it learns.
//! Discovery answers rarely change for the lifetime of a process, so the cache never expires.
//!
//! The discovery transport is not part of this crate; plug one in by implementing [`Discover`].
//!
//! [`RestMapping`]: crate::core::RestMapping
//! [`Scope`]: crate::core::Scope
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub use k8s_openapi;
/// Re-exports from [`kube-restmapper-core`](kube_restmapper_core)
pub use kube_restmapper_core as core;

pub mod cache;
pub use cache::{DiscoveryCache, GroupVersionResources};

pub mod discovery;
pub use discovery::Discover;

pub mod error;
pub use error::{DiscoveryError, Error};

mod mapper;
pub use mapper::RestMapper;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

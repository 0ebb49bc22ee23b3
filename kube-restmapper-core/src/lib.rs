//! Types shared by the kube REST mapper
//!
//! This crate holds the client-less half of the mapper: identifiers for groups, versions,
//! kinds and resources, and the [`RestMapping`] they resolve to.
//! The same information is re-exported from `kube-restmapper` under `kube_restmapper::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod gvk;
pub use gvk::{GroupKind, GroupVersion, GroupVersionKind, GroupVersionResource, ParseGroupVersionError};

pub mod mapping;
pub use mapping::{RestMapping, Scope};

mod error;
pub use error::ErrorResponse;

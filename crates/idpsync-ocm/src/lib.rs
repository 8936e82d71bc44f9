//! idpsync OCM - Clusters management API client
//!
//! Covers the small slice of the clusters management API needed to manage
//! htpasswd identity providers:
//! - Domain objects and builders for htpasswd users
//! - A fluent resource client (`clusters/{id}/identity_providers/{id}/htpasswd_users`)
//! - The bulk `import` request, which replaces the whole user list
//!
//! The [`IdentityProvidersApi`] trait is the seam the sync operation is
//! written against.

pub mod api;
pub mod client;
pub mod htpasswd;

pub use api::*;
pub use client::*;
pub use htpasswd::*;

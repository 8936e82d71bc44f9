//! idpsync Identity - Declared users to remote identity provider
//!
//! Two steps, run in sequence by [`update_htpasswd`]:
//! - Translate a [`DesiredUserSet`] into the remote htpasswd user list
//! - Import that list, replacing every user the identity provider had
//!
//! [`HtpasswdSpec`] adapts loosely-typed configuration into a
//! [`DesiredUserSet`] before any of that happens.

pub mod htpasswd;


pub use htpasswd::schema::{HtpasswdSpec, HtpasswdUserSpec};
pub use htpasswd::{build_htpasswd_user_list, update_htpasswd};

// Re-export the declarative model
pub use idpsync_core::{Credential, DesiredUserSet, IdentityProviderId};

//! The remote operations the sync layer depends on

use async_trait::async_trait;

use idpsync_core::IdentityProviderId;

use crate::client::{IdentityProvidersClient, SendError};
use crate::htpasswd::HtpasswdUser;

/// Operations against the identity providers of one cluster.
///
/// Implementations decide their own transport, timeouts and concurrency
/// safety; callers only see [`SendError`].
#[async_trait]
pub trait IdentityProvidersApi: Send + Sync {
    /// Replace the entire htpasswd user list of `idp_id` with `items`
    async fn import_htpasswd_users(
        &self,
        idp_id: &IdentityProviderId,
        items: Vec<HtpasswdUser>,
    ) -> Result<(), SendError>;
}

#[async_trait]
impl IdentityProvidersApi for IdentityProvidersClient {
    async fn import_htpasswd_users(
        &self,
        idp_id: &IdentityProviderId,
        items: Vec<HtpasswdUser>,
    ) -> Result<(), SendError> {
        self.identity_provider(idp_id)
            .htpasswd_users()
            .import()
            .items(items)
            .send()
            .await
            .map(|_| ())
    }
}

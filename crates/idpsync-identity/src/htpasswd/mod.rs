//! HTPasswd identity provider sync
//!
//! Always a full replacement: whatever the identity provider held before,
//! afterwards it holds exactly the desired users. There is no diffing and
//! no retry here.
//!
//! Usernames are passed through as declared. Duplicates and password
//! strength are left for the remote service to judge.

pub mod schema;

use tracing::{debug, error, info, instrument};

use idpsync_core::{DesiredUserSet, IdentityProviderId, IdpSyncError, Result};
use idpsync_ocm::{HtpasswdUser, HtpasswdUserListBuilder, IdentityProvidersApi};

/// Translate the desired users into the remote user list builder.
///
/// One item per credential, in input order. An empty set yields an empty
/// list, which removes every user on import.
pub fn build_htpasswd_user_list(users: &DesiredUserSet) -> HtpasswdUserListBuilder {
    let items = users.iter().enumerate().map(|(index, credential)| {
        debug!(index, username = %credential.username(), "Adding htpasswd user");
        HtpasswdUser::builder()
            .username(credential.username())
            .password(credential.password().clone())
    });

    let builder = HtpasswdUserListBuilder::new().items(items);
    debug!(count = builder.len(), "Translated htpasswd users");
    builder
}

/// Replace the htpasswd users of `idp_id` with `users`.
///
/// Sends exactly one import request. If the list cannot be built, nothing
/// is sent.
#[instrument(skip_all, fields(idp_id = %idp_id, user_count = users.len()))]
pub async fn update_htpasswd<C>(
    users: &DesiredUserSet,
    idp_id: &IdentityProviderId,
    client: &C,
) -> Result<()>
where
    C: IdentityProvidersApi + ?Sized,
{
    let user_list = build_htpasswd_user_list(users).build().map_err(|e| {
        error!("Failed to build htpasswd user list: {}", e);
        e
    })?;

    info!("Importing {} htpasswd users", user_list.len());

    client
        .import_htpasswd_users(idp_id, user_list.into_items())
        .await
        .map_err(|e| {
            let err = IdpSyncError::from(e);
            error!("Htpasswd users import failed: {}", err);
            err
        })?;

    info!("Htpasswd users replaced");
    Ok(())
}

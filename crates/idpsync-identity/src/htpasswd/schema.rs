//! Configuration shape of an htpasswd identity provider
//!
//! Declared configuration arrives with every attribute optional. This adapter
//! enforces the required attributes and unwraps them into the plain
//! declarative model:
//!
//! - `users`: required, ordered, may be empty
//! - `users[].username`: required, non-empty
//! - `users[].password`: required, non-empty, sensitive
//!
//! Nothing here is `Serialize`, so a password cannot end up in a snapshot.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;

use idpsync_core::{Credential, DesiredUserSet, IdpSyncError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtpasswdSpec {
    #[serde(default)]
    pub users: Option<Vec<HtpasswdUserSpec>>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtpasswdUserSpec {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl fmt::Debug for HtpasswdUserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtpasswdUserSpec")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn required(value: Option<String>, attribute: &str) -> Result<String> {
    match value {
        None => Err(IdpSyncError::invalid_input(format!("{} is required", attribute))),
        Some(v) if v.is_empty() => Err(IdpSyncError::invalid_input(format!(
            "{} must not be empty",
            attribute
        ))),
        Some(v) => Ok(v),
    }
}

fn required_secret(value: Option<SecretString>, attribute: &str) -> Result<SecretString> {
    match value {
        None => Err(IdpSyncError::invalid_input(format!("{} is required", attribute))),
        Some(v) if v.expose_secret().is_empty() => Err(IdpSyncError::invalid_input(format!(
            "{} must not be empty",
            attribute
        ))),
        Some(v) => Ok(v),
    }
}

impl TryFrom<HtpasswdUserSpec> for Credential {
    type Error = IdpSyncError;

    fn try_from(spec: HtpasswdUserSpec) -> Result<Self> {
        let username = required(spec.username, "username")?;
        let password = required_secret(spec.password, "password")?;
        Ok(Credential::from_secret(username, password))
    }
}

impl TryFrom<HtpasswdSpec> for DesiredUserSet {
    type Error = IdpSyncError;

    fn try_from(spec: HtpasswdSpec) -> Result<Self> {
        let users = spec
            .users
            .ok_or_else(|| IdpSyncError::invalid_input("users is required"))?;

        users
            .into_iter()
            .enumerate()
            .map(|(index, user)| {
                Credential::try_from(user).map_err(|e| match e {
                    IdpSyncError::InvalidInput { message } => {
                        IdpSyncError::invalid_input(format!("users[{}].{}", index, message))
                    }
                    other => other,
                })
            })
            .collect()
    }
}

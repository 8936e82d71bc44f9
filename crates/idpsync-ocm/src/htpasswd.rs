//! HTPasswd user domain objects and their builders

use secrecy::{ExposeSecret, SecretString};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use idpsync_core::{IdpSyncError, Result};

pub const HTPASSWD_USER_KIND: &str = "HTPasswdUser";

/// A user entry of an htpasswd identity provider, ready to be sent
#[derive(Debug, Clone)]
pub struct HtpasswdUser {
    username: String,
    password: SecretString,
}

impl HtpasswdUser {
    pub fn builder() -> HtpasswdUserBuilder {
        HtpasswdUserBuilder::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

// The password is exposed here and nowhere else.
impl Serialize for HtpasswdUser {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HtpasswdUser", 3)?;
        state.serialize_field("kind", HTPASSWD_USER_KIND)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

/// Builder for [`HtpasswdUser`]
#[derive(Debug, Clone, Default)]
pub struct HtpasswdUserBuilder {
    username: Option<String>,
    password: Option<SecretString>,
}

impl HtpasswdUserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    /// Finalize the user.
    ///
    /// Both attributes must be set. The username must be non-empty and may
    /// not contain `:` or line breaks, since an htpasswd entry is a single
    /// `username:hash` line.
    pub fn build(self) -> Result<HtpasswdUser> {
        let username = self
            .username
            .ok_or_else(|| IdpSyncError::build("username is required"))?;
        let password = self
            .password
            .ok_or_else(|| IdpSyncError::build("password is required"))?;

        if username.is_empty() {
            return Err(IdpSyncError::build("username must not be empty"));
        }
        if username.contains([':', '\n', '\r']) {
            return Err(IdpSyncError::build(format!(
                "username '{}' must not contain ':' or line breaks",
                username.escape_debug()
            )));
        }

        Ok(HtpasswdUser { username, password })
    }
}

/// A finalized, ordered list of htpasswd users
#[derive(Debug, Clone, Default)]
pub struct HtpasswdUserList {
    items: Vec<HtpasswdUser>,
}

impl HtpasswdUserList {
    pub fn builder() -> HtpasswdUserListBuilder {
        HtpasswdUserListBuilder::default()
    }

    pub fn items(&self) -> &[HtpasswdUser] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<HtpasswdUser> {
        self.items
    }
}

/// Builder for [`HtpasswdUserList`]
#[derive(Debug, Clone, Default)]
pub struct HtpasswdUserListBuilder {
    items: Vec<HtpasswdUserBuilder>,
}

impl HtpasswdUserListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items of the list
    pub fn items(mut self, items: impl IntoIterator<Item = HtpasswdUserBuilder>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finalize every item, failing on the first one that cannot be built
    pub fn build(self) -> Result<HtpasswdUserList> {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                item.build().map_err(|e| match e {
                    IdpSyncError::Build { message } => {
                        IdpSyncError::build(format!("htpasswd user at index {}: {}", index, message))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(HtpasswdUserList { items })
    }
}

/// A user as reported back by the service. Passwords are never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtpasswdUserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub username: String,
}

//! Declarative model of the desired htpasswd users
//!
//! A [`DesiredUserSet`] is the complete list of local users a caller wants on
//! the remote identity provider. It is plain data: no framework wrappers, no
//! validation, no deduplication.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// A single username/password pair
#[derive(Clone)]
pub struct Credential {
    username: String,
    password: SecretString,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Build from a password that is already wrapped
    pub fn from_secret(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Cleartext password. Only the wire serializer should need this.
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Ordered desired set of credentials. Empty means "no local users".
#[derive(Debug, Clone, Default)]
pub struct DesiredUserSet {
    users: Vec<Credential>,
}

impl DesiredUserSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, credential: Credential) {
        self.users.push(credential);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Credential> {
        self.users.iter()
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(Credential::username)
    }
}

impl From<Vec<Credential>> for DesiredUserSet {
    fn from(users: Vec<Credential>) -> Self {
        Self { users }
    }
}

impl FromIterator<Credential> for DesiredUserSet {
    fn from_iter<I: IntoIterator<Item = Credential>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DesiredUserSet {
    type Item = Credential;
    type IntoIter = std::vec::IntoIter<Credential>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.into_iter()
    }
}

impl<'a> IntoIterator for &'a DesiredUserSet {
    type Item = &'a Credential;
    type IntoIter = std::slice::Iter<'a, Credential>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}

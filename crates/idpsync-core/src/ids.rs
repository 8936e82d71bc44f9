//! Opaque identifiers for remote resources
//!
//! The remote service hands out its own identifiers; they are carried
//! verbatim and only checked for being non-blank.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::IdpSyncError;

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> crate::Result<Self> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(IdpSyncError::invalid_input(concat!(
                        $label,
                        " id must not be empty"
                    )));
                }
                Ok(Self(id))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdpSyncError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_id!(ClusterId, "cluster");
define_id!(IdentityProviderId, "identity provider");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id: IdentityProviderId = "idp-123".parse().unwrap();
        assert_eq!(id.as_str(), "idp-123");
        assert_eq!(id.to_string(), "idp-123");
    }

    #[test]
    fn test_blank_id_rejected() {
        let err = ClusterId::new("   ").unwrap_err();
        assert!(err.to_string().contains("cluster id must not be empty"));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ClusterId::new("1a2b3c").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1a2b3c\"");
    }
}

//! Unit tests for idpsync-core

use super::*;

// =============================================================================
// Credential Tests
// =============================================================================

#[cfg(test)]
mod credential_tests {
    use super::*;

    #[test]
    fn test_credential_accessors() {
        let cred = Credential::new("alice", "p1");
        assert_eq!(cred.username(), "alice");
        assert_eq!(cred.expose_password(), "p1");
    }

    #[test]
    fn test_credential_debug_redacts_password() {
        let cred = Credential::new("alice", "hunter2-secret");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("alice"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2-secret"));
    }

    #[test]
    fn test_user_set_debug_redacts_passwords() {
        let set: DesiredUserSet = vec![
            Credential::new("alice", "first-secret"),
            Credential::new("bob", "second-secret"),
        ]
        .into();
        let debug = format!("{:?}", set);
        assert!(!debug.contains("first-secret"));
        assert!(!debug.contains("second-secret"));
    }
}

// =============================================================================
// DesiredUserSet Tests
// =============================================================================

#[cfg(test)]
mod user_set_tests {
    use super::*;

    #[test]
    fn test_empty_set_is_valid() {
        let set = DesiredUserSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_order_is_preserved() {
        let mut set = DesiredUserSet::new();
        set.push(Credential::new("carol", "c"));
        set.push(Credential::new("alice", "a"));
        set.push(Credential::new("bob", "b"));

        let names: Vec<&str> = set.usernames().collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn test_duplicates_pass_through() {
        let set: DesiredUserSet = ["alice", "alice"]
            .into_iter()
            .map(|name| Credential::new(name, "pw"))
            .collect();
        assert_eq!(set.len(), 2);
    }
}

// =============================================================================
// Error Tests
// =============================================================================

#[cfg(test)]
mod error_tests {
    use super::*;

    fn api_error(reason: &str) -> ApiError {
        ApiError {
            kind: "Error".to_string(),
            id: "400".to_string(),
            href: "/api/clusters_mgmt/v1/errors/400".to_string(),
            code: "CLUSTERS-MGMT-400".to_string(),
            reason: reason.to_string(),
            operation_id: Some("op-42".to_string()),
        }
    }

    #[test]
    fn test_structured_error_takes_precedence() {
        let err = IdpSyncError::from_remote(
            Some(api_error("Password must be at least 14 characters")),
            "HTTP 400 Bad Request",
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Remote error: Password must be at least 14 characters"));
        assert!(msg.contains("CLUSTERS-MGMT-400"));
        assert!(msg.contains("op-42"));
        assert!(msg.contains("HTTP 400 Bad Request"));
        assert!(err.api_error().is_some());
    }

    #[test]
    fn test_missing_payload_falls_back_to_transport() {
        let err = IdpSyncError::from_remote(None, "connection refused");
        assert!(matches!(err, IdpSyncError::Transport { .. }));
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_empty_payload_falls_back_to_transport() {
        let err = IdpSyncError::from_remote(Some(ApiError::default()), "HTTP 502");
        assert!(matches!(err, IdpSyncError::Transport { .. }));
    }

    #[test]
    fn test_payload_without_reason_uses_transport_text() {
        let payload = ApiError {
            code: "CLUSTERS-MGMT-404".to_string(),
            ..ApiError::default()
        };
        let err = IdpSyncError::from_remote(Some(payload), "HTTP 404 Not Found");
        assert_eq!(
            err.to_string(),
            "Remote error: HTTP 404 Not Found (code: CLUSTERS-MGMT-404)"
        );
    }

    #[test]
    fn test_api_error_decodes_partial_payload() {
        let payload: ApiError =
            serde_json::from_str(r#"{"kind":"Error","reason":"Identity provider not found"}"#)
                .unwrap();
        assert_eq!(payload.reason, "Identity provider not found");
        assert!(payload.operation_id.is_none());
    }
}

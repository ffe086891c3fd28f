//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use comparebuddy_core::{UserId, Username};

/// An account, as returned to clients.
///
/// The password hash is never part of this type; it is loaded separately
/// by the repository when a login needs it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name. Google-provisioned accounts use their email here.
    pub username: Username,
    /// Email address, absent for password accounts registered without one.
    pub email: Option<String>,
    /// Name shown in the UI.
    pub display_name: String,
    /// Google subject identifier for accounts created through Google login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// Profile picture URL from the identity provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(7),
            username: Username::parse("alice").unwrap(),
            email: None,
            display_name: "alice".to_string(),
            google_id: None,
            avatar_url: None,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_password_user_json_shape() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "alice");
        assert!(json["email"].is_null());
        assert!(json.get("google_id").is_none());
        assert!(json.get("avatar_url").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_google_user_json_includes_provider_fields() {
        let user = User {
            google_id: Some("1234567890".to_string()),
            avatar_url: Some("https://example.com/a.png".to_string()),
            email: Some("alice@example.com".to_string()),
            ..sample_user()
        };
        let json = serde_json::to_value(user).unwrap();
        assert_eq!(json["google_id"], "1234567890");
        assert_eq!(json["avatar_url"], "https://example.com/a.png");
        assert_eq!(json["email"], "alice@example.com");
    }
}

use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Client,
    Agent,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Client => "client",
            UserRole::Agent => "agent",
            UserRole::Admin => "admin",
        }
    }

    /// Roles allowed to publish listings and view the booking calendar.
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Agent | UserRole::Admin)
    }

    /// Roles a user may pick for themselves at registration. Admin is
    /// never self-assignable.
    pub fn from_registration_str(role: &str) -> Option<UserRole> {
        match role {
            "client" => Some(UserRole::Client),
            "agent" => Some(UserRole::Agent),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_roles_exclude_admin() {
        assert_eq!(UserRole::from_registration_str("client"), Some(UserRole::Client));
        assert_eq!(UserRole::from_registration_str("agent"), Some(UserRole::Agent));
        assert_eq!(UserRole::from_registration_str("admin"), None);
        assert_eq!(UserRole::from_registration_str("moderator"), None);
    }

    #[test]
    fn staff_roles() {
        assert!(!UserRole::Client.is_staff());
        assert!(UserRole::Agent.is_staff());
        assert!(UserRole::Admin.is_staff());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::User;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 3, max = 100, message = "Username must be between 3-100 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    /// "client" or "agent"; anything else is rejected by the handler.
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.to_str().to_string(),
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegisterUserDto {
        RegisterUserDto {
            email: "tester@example.com".to_string(),
            username: "tester".to_string(),
            first_name: "Test".to_string(),
            last_name: "Er".to_string(),
            password: "secret1".to_string(),
            role: "client".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn bad_email_fails_validation() {
        let mut dto = valid_registration();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn short_password_fails_validation() {
        let mut dto = valid_registration();
        dto.password = "12345".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn filter_user_never_exposes_password() {
        let user = crate::service::access::tests::test_user(
            crate::models::usermodel::UserRole::Client,
            false,
        );
        let filtered = FilterUserDto::filter_user(&user);
        let json = serde_json::to_string(&filtered).unwrap();
        assert!(!json.contains("password"));
        assert_eq!(filtered.role, "client");
    }
}

//! Role and ownership checks, kept as pure functions over the caller and
//! the target resource so handlers stay thin and the rules stay testable.

use uuid::Uuid;

use crate::models::usermodel::{User, UserRole};

/// Owner of the resource, or any admin.
pub fn can_manage_property(user: &User, owner_id: Uuid) -> bool {
    user.id == owner_id || user.role == UserRole::Admin
}

/// Bookings are managed through the underlying property's owner.
pub fn can_manage_booking(user: &User, property_owner_id: Uuid) -> bool {
    can_manage_property(user, property_owner_id)
}

/// Only verified agents (or admins) may publish listings.
pub fn can_create_listing(user: &User) -> Result<(), ListingDenied> {
    if !user.role.is_staff() {
        return Err(ListingDenied::NotAgent);
    }
    if !user.is_verified {
        return Err(ListingDenied::NotVerified);
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
pub enum ListingDenied {
    NotAgent,
    NotVerified,
}

pub fn can_view_calendar(user: &User) -> bool {
    user.role.is_staff()
}

pub fn is_admin(user: &User) -> bool {
    user.role == UserRole::Admin
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;

    pub fn test_user(role: UserRole, is_verified: bool) -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            username: "user".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: "hash".to_string(),
            role,
            is_verified,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_can_manage_own_property() {
        let agent = test_user(UserRole::Agent, true);
        assert!(can_manage_property(&agent, agent.id));
    }

    #[test]
    fn non_owner_client_cannot_manage_property() {
        let client = test_user(UserRole::Client, true);
        assert!(!can_manage_property(&client, Uuid::new_v4()));
    }

    #[test]
    fn admin_can_manage_any_property() {
        let admin = test_user(UserRole::Admin, true);
        assert!(can_manage_property(&admin, Uuid::new_v4()));
    }

    #[test]
    fn booking_management_follows_property_ownership() {
        let agent = test_user(UserRole::Agent, true);
        let other_owner = Uuid::new_v4();
        assert!(can_manage_booking(&agent, agent.id));
        assert!(!can_manage_booking(&agent, other_owner));
    }

    #[test]
    fn unverified_agent_cannot_create_listing() {
        let agent = test_user(UserRole::Agent, false);
        assert_eq!(can_create_listing(&agent), Err(ListingDenied::NotVerified));
    }

    #[test]
    fn client_cannot_create_listing_even_when_verified() {
        let client = test_user(UserRole::Client, true);
        assert_eq!(can_create_listing(&client), Err(ListingDenied::NotAgent));
    }

    #[test]
    fn verified_agent_and_admin_can_create_listing() {
        assert_eq!(can_create_listing(&test_user(UserRole::Agent, true)), Ok(()));
        assert_eq!(can_create_listing(&test_user(UserRole::Admin, true)), Ok(()));
    }

    #[test]
    fn calendar_is_staff_only() {
        assert!(!can_view_calendar(&test_user(UserRole::Client, true)));
        assert!(can_view_calendar(&test_user(UserRole::Agent, false)));
        assert!(can_view_calendar(&test_user(UserRole::Admin, true)));
    }
}

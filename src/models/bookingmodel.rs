use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Declined,
}

impl BookingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Declined => "declined",
        }
    }

    /// Statuses an agent may move a pending booking to. `pending` is the
    /// initial state only, never a transition target.
    pub fn from_transition_str(status: &str) -> Option<BookingStatus> {
        match status {
            "confirmed" => Some(BookingStatus::Confirmed),
            "declined" => Some(BookingStatus::Declined),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub client_id: Uuid,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_targets_are_confirmed_or_declined_only() {
        assert_eq!(
            BookingStatus::from_transition_str("confirmed"),
            Some(BookingStatus::Confirmed)
        );
        assert_eq!(
            BookingStatus::from_transition_str("declined"),
            Some(BookingStatus::Declined)
        );
        assert_eq!(BookingStatus::from_transition_str("pending"), None);
        assert_eq!(BookingStatus::from_transition_str("cancelled"), None);
        assert_eq!(BookingStatus::from_transition_str(""), None);
    }
}

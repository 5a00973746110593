use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::bookingmodel::Booking;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingDto {
    pub property_id: Uuid,
    pub booking_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQueryDto {
    pub day: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct BookingStatusQueryDto {
    pub new_status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponseDto {
    pub status: String,
    pub booking: Booking,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingListResponseDto {
    pub status: String,
    pub results: usize,
    pub bookings: Vec<Booking>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_day_parses_iso_date() {
        let query: CalendarQueryDto = serde_json::from_str(r#"{"day": "2026-05-20"}"#).unwrap();
        assert_eq!(query.day, NaiveDate::from_ymd_opt(2026, 5, 20).unwrap());
    }

    #[test]
    fn booking_date_parses_rfc3339() {
        let dto: CreateBookingDto = serde_json::from_str(
            r#"{"property_id": "7f7c7c1e-57c1-4f2a-a13e-97a1b5a6e2a4", "booking_date": "2026-05-20T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(dto.booking_date.to_rfc3339(), "2026-05-20T10:00:00+00:00");
    }
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::bookingmodel::{Booking, BookingStatus};

const BOOKING_COLUMNS: &str = "id, property_id, client_id, booking_date, status, created_at";

#[async_trait]
pub trait BookingExt {
    async fn create_booking(
        &self,
        property_id: Uuid,
        client_id: Uuid,
        booking_date: DateTime<Utc>,
    ) -> Result<Booking, sqlx::Error>;

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error>;

    /// A slot is taken only by a `confirmed` booking at the exact same
    /// timestamp. Two bookings minutes apart on the same property never
    /// conflict.
    async fn get_confirmed_booking_at(
        &self,
        property_id: Uuid,
        booking_date: DateTime<Utc>,
    ) -> Result<Option<Booking>, sqlx::Error>;

    /// Bookings on properties owned by `owner_id` falling on the given
    /// calendar day, earliest first.
    async fn get_daily_schedule(
        &self,
        owner_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<Booking>, sqlx::Error>;

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error>;

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, sqlx::Error>;

    async fn get_booking_count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl BookingExt for DBClient {
    async fn create_booking(
        &self,
        property_id: Uuid,
        client_id: Uuid,
        booking_date: DateTime<Utc>,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (property_id, client_id, booking_date, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(property_id)
        .bind(client_id)
        .bind(booking_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_confirmed_booking_at(
        &self,
        property_id: Uuid,
        booking_date: DateTime<Utc>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM bookings
            WHERE property_id = $1 AND booking_date = $2 AND status = 'confirmed'
            "#
        ))
        .bind(property_id)
        .bind(booking_date)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_daily_schedule(
        &self,
        owner_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT b.id, b.property_id, b.client_id, b.booking_date, b.status, b.created_at
            FROM bookings b
            JOIN properties p ON p.id = b.property_id
            WHERE p.owner_id = $1 AND b.booking_date::date = $2
            ORDER BY b.booking_date ASC
            "#,
        )
        .bind(owner_id)
        .bind(day)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY booking_date ASC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_booking_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::propertymodel::{Favorite, Property, PropertyImage, PropertyType};

const PROPERTY_COLUMNS: &str =
    "id, title, description, price, property_type, location, status, owner_id, created_at";

/// Optional filters for the public listing search. All of them intersect.
#[derive(Debug, Default)]
pub struct PropertySearchFilters {
    pub title: Option<String>,
    pub property_type: Option<PropertyType>,
    pub location: Option<String>,
    pub max_price: Option<f64>,
}

#[async_trait]
pub trait PropertyExt {
    async fn create_property<T: Into<String> + Send>(
        &self,
        title: T,
        description: T,
        price: f64,
        property_type: PropertyType,
        location: T,
        owner_id: Uuid,
    ) -> Result<Property, sqlx::Error>;

    async fn get_property_by_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Property>, sqlx::Error>;

    /// Listings of verified owners only, narrowed by the given filters.
    async fn search_properties(
        &self,
        filters: PropertySearchFilters,
    ) -> Result<Vec<Property>, sqlx::Error>;

    /// Removes the property together with its images, reviews, bookings and
    /// favorites in one transaction. Image files on disk are the caller's
    /// concern.
    async fn delete_property(&self, property_id: Uuid) -> Result<(), sqlx::Error>;

    async fn save_property_image(
        &self,
        property_id: Uuid,
        url: String,
    ) -> Result<PropertyImage, sqlx::Error>;

    async fn get_property_images(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<PropertyImage>, sqlx::Error>;

    async fn add_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Favorite, sqlx::Error>;

    async fn get_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<Favorite>, sqlx::Error>;

    async fn remove_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<u64, sqlx::Error>;

    async fn get_favorite_properties(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_property_count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn create_property<T: Into<String> + Send>(
        &self,
        title: T,
        description: T,
        price: f64,
        property_type: PropertyType,
        location: T,
        owner_id: Uuid,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            r#"
            INSERT INTO properties (title, description, price, property_type, location, status, owner_id)
            VALUES ($1, $2, $3, $4, $5, 'available', $6)
            RETURNING {PROPERTY_COLUMNS}
            "#
        ))
        .bind(title.into())
        .bind(description.into())
        .bind(price)
        .bind(property_type)
        .bind(location.into())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_property_by_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1"
        ))
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn search_properties(
        &self,
        filters: PropertySearchFilters,
    ) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT p.id, p.title, p.description, p.price, p.property_type,
                   p.location, p.status, p.owner_id, p.created_at
            FROM properties p
            JOIN users u ON u.id = p.owner_id
            WHERE u.is_verified = TRUE
            AND ($1::text IS NULL OR p.title ILIKE $1)
            AND ($2::property_type IS NULL OR p.property_type = $2)
            AND ($3::text IS NULL OR p.location ILIKE $3)
            AND ($4::double precision IS NULL OR p.price <= $4)
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(filters.title.as_ref().map(|t| format!("%{}%", t)))
        .bind(filters.property_type)
        .bind(filters.location.as_ref().map(|l| format!("%{}%", l)))
        .bind(filters.max_price)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM favorites WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM bookings WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM reviews WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM property_images WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }

    async fn save_property_image(
        &self,
        property_id: Uuid,
        url: String,
    ) -> Result<PropertyImage, sqlx::Error> {
        sqlx::query_as::<_, PropertyImage>(
            r#"
            INSERT INTO property_images (property_id, url)
            VALUES ($1, $2)
            RETURNING id, property_id, url, created_at
            "#,
        )
        .bind(property_id)
        .bind(url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_property_images(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<PropertyImage>, sqlx::Error> {
        sqlx::query_as::<_, PropertyImage>(
            "SELECT id, property_id, url, created_at FROM property_images WHERE property_id = $1",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn add_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Favorite, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, property_id)
            VALUES ($1, $2)
            RETURNING id, user_id, property_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, property_id, created_at FROM favorites WHERE user_id = $1 AND property_id = $2",
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn remove_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND property_id = $2")
            .bind(user_id)
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_favorite_properties(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT p.id, p.title, p.description, p.price, p.property_type,
                   p.location, p.status, p.owner_id, p.created_at
            FROM properties p
            JOIN favorites f ON f.property_id = p.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_property_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::reviewmodel::Review;

const REVIEW_COLUMNS: &str = "id, property_id, author_id, rating, comment, created_at";

#[async_trait]
pub trait ReviewExt {
    async fn create_review(
        &self,
        property_id: Uuid,
        author_id: Uuid,
        rating: i32,
        comment: String,
    ) -> Result<Review, sqlx::Error>;

    async fn get_review_by_author(
        &self,
        property_id: Uuid,
        author_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error>;

    async fn get_review_by_id(&self, review_id: Uuid) -> Result<Option<Review>, sqlx::Error>;

    async fn get_property_reviews(&self, property_id: Uuid) -> Result<Vec<Review>, sqlx::Error>;

    async fn get_all_reviews(&self) -> Result<Vec<Review>, sqlx::Error>;

    async fn delete_review(&self, review_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn get_review_count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(
        &self,
        property_id: Uuid,
        author_id: Uuid,
        rating: i32,
        comment: String,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (property_id, author_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(property_id)
        .bind(author_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_review_by_author(
        &self,
        property_id: Uuid,
        author_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE property_id = $1 AND author_id = $2"
        ))
        .bind(property_id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_review_by_id(&self, review_id: Uuid) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_property_reviews(&self, property_id: Uuid) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE property_id = $1 ORDER BY created_at ASC"
        ))
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_all_reviews(&self) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_review(&self, review_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_review_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::messagemodel::Message;

const MESSAGE_COLUMNS: &str = "id, sender_id, receiver_id, content, created_at";

#[async_trait]
pub trait MessageExt {
    async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, sqlx::Error>;

    /// Everything sent or received by the user, newest first.
    async fn get_inbox(&self, user_id: Uuid) -> Result<Vec<Message>, sqlx::Error>;

    /// Both directions of a pairwise conversation, oldest first.
    async fn get_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<Message>, sqlx::Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (sender_id, receiver_id, content)
            VALUES ($1, $2, $3)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_inbox(&self, user_id: Uuid) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#
        ))
        .bind(user_id)
        .bind(other_user_id)
        .fetch_all(&self.pool)
        .await
    }
}

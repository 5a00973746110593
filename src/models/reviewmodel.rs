use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: Uuid,
    pub property_id: Uuid,
    pub author_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

pub fn rating_in_bounds(rating: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(!rating_in_bounds(0));
        assert!(rating_in_bounds(1));
        assert!(rating_in_bounds(3));
        assert!(rating_in_bounds(5));
        assert!(!rating_in_bounds(6));
        assert!(!rating_in_bounds(-1));
    }
}

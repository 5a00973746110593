use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::reviewmodel::Review;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    pub property_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponseDto {
    pub status: String,
    pub review: Review,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewListResponseDto {
    pub status: String,
    pub results: usize,
    pub reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_dto(rating: i32) -> CreateReviewDto {
        CreateReviewDto {
            property_id: Uuid::new_v4(),
            rating,
            comment: "Spacious and bright.".to_string(),
        }
    }

    #[test]
    fn in_range_ratings_validate() {
        for rating in 1..=5 {
            assert!(review_dto(rating).validate().is_ok());
        }
    }

    #[test]
    fn out_of_range_ratings_fail() {
        assert!(review_dto(0).validate().is_err());
        assert!(review_dto(6).validate().is_err());
        assert!(review_dto(-3).validate().is_err());
    }
}

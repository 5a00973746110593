use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::propertymodel::{Property, PropertyImage, PropertyType};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    pub property_type: PropertyType,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PropertySearchQueryDto {
    pub title: Option<String>,
    pub prop_type: Option<PropertyType>,
    pub location: Option<String>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyListResponseDto {
    pub status: String,
    pub results: usize,
    pub properties: Vec<Property>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyResponseDto {
    pub status: String,
    pub property: Property,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyDetailResponseDto {
    pub status: String,
    pub property: Property,
    pub images: Vec<PropertyImage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageUploadResponseDto {
    pub status: String,
    pub message: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_fails_validation() {
        let dto = CreatePropertyDto {
            title: "Two-bedroom flat".to_string(),
            description: String::new(),
            price: -1.0,
            property_type: PropertyType::Rent,
            location: "Sofia".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn search_query_accepts_partial_filters() {
        let query: PropertySearchQueryDto =
            serde_json::from_str(r#"{"location": "sofia", "max_price": 1200.0}"#).unwrap();
        assert_eq!(query.location.as_deref(), Some("sofia"));
        assert_eq!(query.max_price, Some(1200.0));
        assert!(query.title.is_none());
        assert!(query.prop_type.is_none());
    }

    #[test]
    fn property_type_deserializes_from_snake_case() {
        let query: PropertySearchQueryDto =
            serde_json::from_str(r#"{"prop_type": "sale"}"#).unwrap();
        assert_eq!(query.prop_type, Some(PropertyType::Sale));
    }
}

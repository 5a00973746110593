use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Rent,
    Sale,
}

impl PropertyType {
    pub fn to_str(&self) -> &str {
        match self {
            PropertyType::Rent => "rent",
            PropertyType::Sale => "sale",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Sold,
    Rented,
}

impl PropertyStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Rented => "rented",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub location: String,
    pub status: PropertyStatus,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PropertyImage {
    pub id: Uuid,
    pub property_id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
}

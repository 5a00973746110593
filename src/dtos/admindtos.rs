use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatsDto {
    pub total_users: i64,
    pub verified_agents: i64,
    pub pending_verifications: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentStatsDto {
    pub total_properties: i64,
    pub total_bookings: i64,
    pub total_reviews: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemInfoDto {
    pub report_generated_at: DateTime<Utc>,
    pub admin_user: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatsResponseDto {
    pub status: String,
    pub user_stats: UserStatsDto,
    pub content_stats: ContentStatsDto,
    pub system_info: SystemInfoDto,
}

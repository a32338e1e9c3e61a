use serde::{Deserialize, Serialize};

/// Audiences accepted by the backend for an announcement.
pub const TARGET_AUDIENCES: &[&str] = &["TEACHERS", "STUDENTS", "PARENTS", "EVERYONE"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub target_audience: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub target_audience: String,
}

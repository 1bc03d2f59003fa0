//! Customer feedback entry

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

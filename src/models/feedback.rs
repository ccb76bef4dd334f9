use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: String,    // external user id, taken from the auth token owner
    pub product_id: String, // id of the external product
    pub text: String,
    pub rate: i32,
    pub moderated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Feedback {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            user_id: String::new(),
            product_id: String::new(),
            text: String::new(),
            rate: 0,
            moderated: false,
            created_at: now,
            updated_at: now,
        }
    }
}

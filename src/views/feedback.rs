use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

// What GET /v1/feedback/{productID} exposes, in the original wire names.
#[derive(Debug, Serialize)]
pub struct Public {
    pub id: Uuid,
    #[serde(rename = "idUser")]
    pub user_id: String,
    pub text: String,
    #[serde(rename = "idProduct")]
    pub product_id: String,
    pub rate: i32,
    pub moderated: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<models::Feedback> for Public {
    fn from(feedback: models::Feedback) -> Self {
        Self {
            id: feedback.id,
            user_id: feedback.user_id,
            text: feedback.text,
            product_id: feedback.product_id,
            rate: feedback.rate,
            moderated: feedback.moderated,
            created: feedback.created_at,
            updated: feedback.updated_at,
        }
    }
}

mod postgres;

pub use postgres::PgStore;

use crate::models;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("feedback not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for feedback records. Handlers only ever talk to this
/// trait; the Postgres implementation lives in `PgStore` and tests inject
/// an in-memory fake.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persists a new record, assigning its id and timestamps.
    async fn insert(&self, feedback: models::Feedback) -> Result<models::Feedback, StoreError>;

    /// All records for a product, oldest first. Empty vec when none exist.
    async fn find_by_product(&self, product_id: &str) -> Result<Vec<models::Feedback>, StoreError>;

    /// Sets the moderation flag on one record and touches its updated_at.
    /// Must be a single atomic find-and-update at the store level.
    async fn moderate(&self, id: Uuid) -> Result<Uuid, StoreError>;
}

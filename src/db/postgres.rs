use super::{FeedbackStore, StoreError};
use crate::models;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgStore {
    async fn insert(&self, feedback: models::Feedback) -> Result<models::Feedback, StoreError> {
        let query_span = tracing::info_span!("Saving new feedback into the database");
        sqlx::query_as::<_, models::Feedback>(
            r#"
            INSERT INTO feedback (id, user_id, product_id, text, rate, moderated, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, false, NOW() at time zone 'utc', NOW() at time zone 'utc')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&feedback.user_id)
        .bind(&feedback.product_id)
        .bind(&feedback.text)
        .bind(feedback.rate)
        .fetch_one(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute insert query: {:?}", err);
            StoreError::from(err)
        })
    }

    async fn find_by_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<models::Feedback>, StoreError> {
        let query_span = tracing::info_span!("Fetching feedback list by product id.");
        sqlx::query_as::<_, models::Feedback>(
            r"SELECT * FROM feedback WHERE product_id = $1 ORDER BY created_at",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute fetch query: {:?}", err);
            StoreError::from(err)
        })
    }

    async fn moderate(&self, id: Uuid) -> Result<Uuid, StoreError> {
        let query_span = tracing::info_span!("Moderating feedback by id.");
        // Single UPDATE so the find-and-set is atomic in Postgres.
        sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE feedback
            SET moderated = true, updated_at = NOW() at time zone 'utc'
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            err => {
                tracing::error!("Failed to execute update query: {:?}", err);
                StoreError::from(err)
            }
        })
    }
}

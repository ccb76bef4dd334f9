use crate::db::{FeedbackStore, StoreError};
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use uuid::Uuid;

#[tracing::instrument(name = "Moderate feedback.", skip_all)]
#[post("/{feedback_id}")]
pub async fn moderate_handler(
    path: web::Path<(String,)>,
    store: web::Data<dyn FeedbackStore>,
) -> Result<impl Responder> {
    let feedback_id = path.into_inner().0;
    // An id that is not a uuid cannot name an existing record.
    let feedback_id = Uuid::parse_str(feedback_id.as_str())
        .map_err(|_err| JsonResponse::<models::Feedback>::build().not_found("not found"))?;

    store
        .moderate(feedback_id)
        .await
        .map(|id| JsonResponse::<models::Feedback>::build().set_id(id).ok("Moderated"))
        .map_err(|err| match err {
            StoreError::NotFound => {
                JsonResponse::<models::Feedback>::build().not_found("not found")
            }
            _ => JsonResponse::<models::Feedback>::build().internal_server_error(""),
        })
}

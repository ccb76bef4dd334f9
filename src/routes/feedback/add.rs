use crate::db::FeedbackStore;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

#[tracing::instrument(name = "Add feedback.", skip_all)]
#[post("")]
pub async fn add_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::feedback::Add>,
    store: web::Data<dyn FeedbackStore>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(
            JsonResponse::<models::Feedback>::build().bad_request(errors.to_string().as_str())
        );
    }

    let feedback = form.into_inner().into_model();
    tracing::info!(
        "user {} submits feedback for product {}",
        user.id,
        feedback.product_id
    );

    store
        .insert(feedback)
        .await
        .map(|saved| {
            tracing::info!("New feedback {} has been saved", saved.id);
            JsonResponse::<models::Feedback>::build().set_id(saved.id).ok("Saved")
        })
        .map_err(|_err| JsonResponse::<models::Feedback>::build().internal_server_error(""))
}

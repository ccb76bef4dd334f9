use crate::db::FeedbackStore;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{get, web, Responder, Result};
use std::convert::Into;

#[tracing::instrument(name = "Get feedbacks of a product.", skip_all)]
#[get("/{product_id}")]
pub async fn list_handler(
    path: web::Path<(String,)>,
    store: web::Data<dyn FeedbackStore>,
) -> Result<impl Responder> {
    let product_id = path.into_inner().0;

    store
        .find_by_product(product_id.as_str())
        .await
        .map(|feedbacks| {
            let feedbacks = feedbacks
                .into_iter()
                .map(Into::into)
                .collect::<Vec<views::feedback::Public>>();

            JsonResponse::build().set_list(feedbacks).ok("OK")
        })
        .map_err(|_err| {
            JsonResponse::<views::feedback::Public>::build().internal_server_error("")
        })
}

use actix_web::body::BoxBody;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse, Responder};
use serde_derive::Serialize;
use uuid::Uuid;

// Uniform response envelope. Every endpoint, success or failure, speaks this.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    pub(crate) id: Option<Uuid>,
    pub(crate) item: Option<T>,
    pub(crate) list: Option<Vec<T>>,
}

#[derive(Default)]
pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    id: Option<Uuid>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn into_response(self, code: StatusCode, status: &str, message: String) -> JsonResponse<T> {
        JsonResponse {
            status: status.to_string(),
            message,
            code: code.as_u16() as u32,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    fn into_error(self, code: StatusCode, message: &str, fallback: &str) -> Error {
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message.to_string()
        };
        let response = self.into_response(code, "Error", message.clone());

        InternalError::from_response(message, HttpResponse::build(code).json(response)).into()
    }

    pub fn ok(self, message: &str) -> JsonResponse<T> {
        let message = if message.trim().is_empty() {
            "Success".to_string()
        } else {
            message.to_string()
        };

        self.into_response(StatusCode::OK, "OK", message)
    }

    pub fn bad_request(self, message: &str) -> Error {
        self.into_error(StatusCode::BAD_REQUEST, message, "Validation error")
    }

    pub fn unauthorized(self, message: &str) -> Error {
        self.into_error(StatusCode::UNAUTHORIZED, message, "Authentication required")
    }

    pub fn not_found(self, message: &str) -> Error {
        self.into_error(StatusCode::NOT_FOUND, message, "Object not found")
    }

    pub fn internal_server_error(self, message: &str) -> Error {
        self.into_error(StatusCode::INTERNAL_SERVER_ERROR, message, "Internal error")
    }
}

impl<T> Responder for JsonResponse<T>
where
    T: serde::Serialize,
{
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::ResponseError;

    #[test]
    fn ok_fills_the_envelope() {
        let id = Uuid::new_v4();
        let response = JsonResponse::<()>::build().set_id(id).ok("Saved");
        assert_eq!(response.status, "OK");
        assert_eq!(response.code, 200);
        assert_eq!(response.id, Some(id));
        assert_eq!(response.message, "Saved");
    }

    #[test]
    fn ok_defaults_blank_messages() {
        let response = JsonResponse::<()>::build().ok("  ");
        assert_eq!(response.message, "Success");
    }

    #[test]
    fn error_variants_map_status_codes() {
        let err = JsonResponse::<()>::build().not_found("");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::NOT_FOUND
        );

        let err = JsonResponse::<()>::build().unauthorized("no token");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );

        let err = JsonResponse::<()>::build().internal_server_error("");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

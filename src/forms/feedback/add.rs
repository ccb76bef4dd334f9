use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

// The public API keeps the original wire names: idUser / idProduct,
// free text in `feedback`, rate in 0..=10.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct AddFeedback {
    #[validate(min_length = 1)]
    #[validate(max_length = 1000)]
    pub feedback: String,
    #[serde(rename = "idUser")]
    #[validate(min_length = 1)]
    pub user_id: String,
    #[serde(rename = "idProduct")]
    #[validate(min_length = 1)]
    pub product_id: String,
    #[validate(minimum = 0)]
    #[validate(maximum = 10)]
    pub rate: i32,
}

impl AddFeedback {
    pub fn into_model(self) -> models::Feedback {
        models::Feedback {
            text: self.feedback,
            user_id: self.user_id,
            product_id: self.product_id,
            rate: self.rate,
            moderated: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(feedback: &str, rate: i32) -> String {
        format!(
            r#"{{"feedback":"{}","idUser":"user-1","idProduct":"product-1","rate":{}}}"#,
            feedback, rate
        )
    }

    #[test]
    fn binds_documented_wire_names() {
        let form: AddFeedback = serde_json::from_str(&body("great product", 7)).unwrap();
        assert_eq!(form.feedback, "great product");
        assert_eq!(form.user_id, "user-1");
        assert_eq!(form.product_id, "product-1");
        assert_eq!(form.rate, 7);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_text_field_is_rejected() {
        let result: Result<AddFeedback, _> =
            serde_json::from_str(r#"{"idUser":"u","idProduct":"p","rate":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_text_fails_validation() {
        let form: AddFeedback = serde_json::from_str(&body("", 5)).unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn rate_out_of_range_fails_validation() {
        let form: AddFeedback = serde_json::from_str(&body("ok", 11)).unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn into_model_starts_unmoderated() {
        let form: AddFeedback = serde_json::from_str(&body("ok", 5)).unwrap();
        let feedback = form.into_model();
        assert!(!feedback.moderated);
        assert_eq!(feedback.text, "ok");
        assert_eq!(feedback.created_at, feedback.updated_at);
    }
}

use crate::models::user::User as UserModel;
use serde_derive::{Deserialize, Serialize};

// Shape of the auth service's "who is this token" response. Only the
// fields this service reads are bound; everything else is ignored.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub user: User,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_confirmed: bool,
}

impl TryInto<UserModel> for UserForm {
    type Error = String;

    fn try_into(self) -> Result<UserModel, Self::Error> {
        if self.user.id.is_empty() {
            return Err("auth server returned a user without an id".to_string());
        }

        Ok(UserModel {
            id: self.user.id,
            first_name: self.user.first_name,
            last_name: self.user.last_name,
            email: self.user.email,
            email_confirmed: self.user.email_confirmed,
        })
    }
}

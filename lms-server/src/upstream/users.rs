use super::{LmsClient, LmsError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

/// External id injected when the caller does not supply one.
const DEFAULT_EXTERNAL_ID: &str = "0234er";

/// Minimal input shape for inviting a user to the platform
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct NewUser {
    /// User's email address
    pub email: String,
    /// User's phone number
    pub phone: String,
    /// Initial password
    pub password: String,
    /// Identifier of the user in the external system that supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Expands the minimal input into the upstream's richer creation payload:
/// a one-element `users` collection with fixed placeholder profile fields,
/// account activation and notification suppression turned on, and labels
/// marked as externally supplied. Pure and stateless.
pub(crate) fn user_create_payload(new_user: &NewUser) -> Value {
    json!({
        "users": [
            {
                "email": new_user.email,
                "name": "name",
                "description": "Corrupti natus quia recusandae.",
                "last_name": "last_name",
                "password": new_user.password,
                "lang": "ru",
                "phone": new_user.phone,
                "role_id": 1,
                "auth_type": 0,
                "external_id": new_user
                    .external_id
                    .as_deref()
                    .unwrap_or(DEFAULT_EXTERNAL_ID),
                "labels": {"23": "25"},
            }
        ],
        "external_labels": true,
        "options": {
            "activate": true,
            "verify_emails": true,
            "skip_notify_new_users": true,
            "skip_notify_active_users": true,
        },
    })
}

impl LmsClient {
    /// Creates (invites) a user on the upstream platform.
    pub async fn create_user(&mut self, new_user: &NewUser) -> Result<Value, LmsError> {
        let url = self.api_url("users/create");
        let payload = user_create_payload(new_user);
        self.send_authorized(move |http| http.post(url).json(&payload))
            .await
    }
}

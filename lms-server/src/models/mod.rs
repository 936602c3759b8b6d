use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Local mirror of an upstream course record.
///
/// Deserialized leniently from whatever the LMS returns: only `id` is
/// required, everything else defaults. Unknown upstream fields are dropped.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Course {
    /// Upstream course identifier
    pub id: i64,
    /// Course title
    #[serde(default)]
    pub name: String,
    /// Course description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Upstream creation timestamp, passed through verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Upstream update timestamp, passed through verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// When this record was last copied from the upstream
    #[serde(default = "Utc::now")]
    pub synced_at: DateTime<Utc>,
}

/// Local mirror of a user record created on the upstream
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MirroredUser {
    /// Upstream user identifier
    pub id: i64,
    /// User's email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// User's phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// User's first name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User's last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Identifier of the user in the external system that supplied it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// When this record was last copied from the upstream
    #[serde(default = "Utc::now")]
    pub synced_at: DateTime<Utc>,
}

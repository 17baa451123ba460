//! Request and response shapes of the Audience API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body of `POST /project/audience/profile/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    pub audience_id: String,
    pub name: String,
    pub identity: String,
    /// Ask the service to email the profile for consent.
    pub send_consent_email: bool,
}

impl CreateProfile {
    pub fn new(
        audience_id: impl Into<String>,
        name: impl Into<String>,
        identity: impl Into<String>,
        send_consent_email: bool,
    ) -> Self {
        Self {
            audience_id: audience_id.into(),
            name: name.into(),
            identity: identity.into(),
            send_consent_email,
        }
    }
}

/// A contact record within an audience.
///
/// Fields the service adds beyond these are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub identity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` of a successful profile creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedProfile {
    pub profile: Profile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

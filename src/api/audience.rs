use crate::error::ResultEnvelope;
use crate::models::{CreateProfile, CreateProfileResponse};
use crate::transport::Transport;
use std::sync::Arc;

const CREATE_PROFILE_PATH: &str = "/project/audience/profile/create";

/// Audience management endpoints.
#[derive(Debug, Clone)]
pub struct AudienceApi {
    transport: Arc<Transport>,
}

impl AudienceApi {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Add a profile (contact) to an audience.
    ///
    /// # Examples
    /// ```no_run
    /// # use ensend_client::{Client, CreateProfile};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ensend_client::Error> {
    /// let client = Client::builder().secret("sk_live_...").build()?;
    /// let result = client
    ///     .audience()
    ///     .create_profile(CreateProfile::new("aud_1", "Jane", "jane@x.com", true))
    ///     .await;
    /// if let Some(created) = result.data.and_then(|body| body.data) {
    ///     println!("created {}", created.profile.reference);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_profile(
        &self,
        input: CreateProfile,
    ) -> ResultEnvelope<CreateProfileResponse> {
        self.transport.post(CREATE_PROFILE_PATH, &input).await
    }
}

//! Ensend client implementation.

use crate::api::{AudienceApi, SendApi};
use crate::config::ClientConfig;
use crate::error::ResultEnvelope;
use crate::transport::{RequestEnvelope, Transport};
use crate::Result;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Async client for the Ensend email service.
///
/// Use [`Client::new`] to configure from the environment or [`Client::builder`]
/// for an explicit secret, base URL, or known identities/templates.
/// Cloning is cheap; clones share one connection pool and configuration.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<Transport>,
    audience: AudienceApi,
    send: SendApi,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client configured from `ENSEND_PROJECT_SECRET` and
    /// `ENSEND_BASE_URL`.
    ///
    /// # Examples
    /// ```no_run
    /// # use ensend_client::Client;
    /// # fn main() -> Result<(), ensend_client::Error> {
    /// let client = Client::new()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// The configuration resolved at construction.
    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Audience endpoints.
    pub fn audience(&self) -> &AudienceApi {
        &self.audience
    }

    /// Mail and broadcast endpoints.
    pub fn send(&self) -> &SendApi {
        &self.send
    }

    /// Issue a raw request through the client's transport.
    ///
    /// Follows the same `{data, error}` rules as the typed operations.
    /// Use `serde_json::Value` as `T` to receive the body untyped.
    ///
    /// # Examples
    /// ```no_run
    /// # use ensend_client::{Client, RequestEnvelope};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ensend_client::Error> {
    /// let client = Client::builder().secret("sk_live_...").build()?;
    /// let result = client
    ///     .request::<serde_json::Value>(RequestEnvelope::get("/project"))
    ///     .await;
    /// println!("{:?}", result.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request<T>(&self, request: RequestEnvelope) -> ResultEnvelope<T>
    where
        T: DeserializeOwned,
    {
        self.transport.call(request).await
    }
}

/// Builder for configuring an Ensend client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    secret: Option<String>,
    base_url: Option<String>,
    identities: Option<Vec<String>>,
    template_ids: Option<Vec<String>>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Secret from `ENSEND_PROJECT_SECRET`
    /// - Base URL from `ENSEND_BASE_URL`, else the production endpoint
    /// - No restriction on sender identities or template ids
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project secret. Takes precedence over the environment.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Restrict senders to these verified identities.
    ///
    /// Sends from any other address are rejected locally with status 400.
    pub fn identities<I, S>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identities = Some(identities.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict template ids to these known templates.
    ///
    /// Sends using any other template are rejected locally with status 400.
    pub fn templates<I, S>(mut self, template_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.template_ids = Some(template_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Resolve the configuration and build the client.
    ///
    /// Performs no network I/O.
    ///
    /// # Examples
    /// ```no_run
    /// # use ensend_client::Client;
    /// # fn main() -> Result<(), ensend_client::Error> {
    /// let client = Client::builder()
    ///     .secret("sk_live_...")
    ///     .identities(["noreply@ensend.co"])
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let config = ClientConfig::resolve(self.secret, self.base_url, |key| {
            std::env::var(key).ok()
        })?
        .with_known_identities(self.identities)
        .with_known_template_ids(self.template_ids);

        let transport = Arc::new(Transport::new(config)?);

        Ok(Client {
            audience: AudienceApi::new(Arc::clone(&transport)),
            send: SendApi::new(Arc::clone(&transport)),
            transport,
        })
    }
}

//! Client configuration and its resolution order.

use crate::{Error, Result};

/// Production endpoint of the Ensend API.
pub const DEFAULT_BASE_URL: &str = "https://api.ensend.co";

/// Environment variable holding the project secret.
pub const SECRET_ENV: &str = "ENSEND_PROJECT_SECRET";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "ENSEND_BASE_URL";

/// Resolved, immutable configuration of a [`Client`](crate::Client).
///
/// Values are resolved once when the client is built and never re-read.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    secret: String,
    known_identities: Option<Vec<String>>,
    known_template_ids: Option<Vec<String>>,
}

impl ClientConfig {
    /// Resolve a configuration from explicit values and an environment lookup.
    ///
    /// Precedence for both the secret and the base URL is:
    /// explicit value, then `env`, then the built-in fallback. Empty values
    /// count as absent. The secret has
    /// no fallback, so [`Error::MissingSecret`] is returned when neither
    /// source provides one.
    ///
    /// # Examples
    /// ```
    /// use ensend_client::ClientConfig;
    ///
    /// let config = ClientConfig::resolve(Some("sk_live".into()), None, |_| None).unwrap();
    /// assert_eq!(config.base_url(), "https://api.ensend.co");
    /// ```
    pub fn resolve<F>(secret: Option<String>, base_url: Option<String>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = secret
            .filter(|s| !s.is_empty())
            .or_else(|| env(SECRET_ENV))
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingSecret)?;

        let base_url = base_url
            .or_else(|| env(BASE_URL_ENV))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            secret,
            known_identities: None,
            known_template_ids: None,
        })
    }

    pub(crate) fn with_known_identities(mut self, identities: Option<Vec<String>>) -> Self {
        self.known_identities = identities;
        self
    }

    pub(crate) fn with_known_template_ids(mut self, template_ids: Option<Vec<String>>) -> Self {
        self.known_template_ids = template_ids;
        self
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The project secret sent as a bearer token.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Sender identities the client accepts, if restricted.
    pub fn known_identities(&self) -> Option<&[String]> {
        self.known_identities.as_deref()
    }

    /// Template ids the client accepts, if restricted.
    pub fn known_template_ids(&self) -> Option<&[String]> {
        self.known_template_ids.as_deref()
    }

    /// Check a sender address against the configured identities.
    pub(crate) fn check_identity(&self, address: &str) -> Result<()> {
        match &self.known_identities {
            Some(known) if !known.iter().any(|i| i == address) => {
                Err(Error::UnknownIdentity(address.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Check a template id against the configured template ids.
    pub(crate) fn check_template(&self, id: &str) -> Result<()> {
        match &self.known_template_ids {
            Some(known) if !known.iter().any(|t| t == id) => {
                Err(Error::UnknownTemplate(id.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("secret", &"<redacted>")
            .field("known_identities", &self.known_identities)
            .field("known_template_ids", &self.known_template_ids)
            .finish()
    }
}

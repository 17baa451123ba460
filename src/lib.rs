//! # Ensend Client
//! Asynchronous, typed wrapper around the Ensend transactional and broadcast email HTTP API: send single mail messages, create broadcasts, append recipients to existing broadcasts, and add profiles to audiences using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust services that deliver product email through Ensend: configure a [`Client`] once, then call the resource APIs ([`SendApi`], [`AudienceApi`]) with request builders such as [`SendMailMessage`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`.
//!
//! ## Out of scope
//! No retries, rate limiting, timeouts, pagination, or webhooks. Each operation is exactly one request and one response.
//!
//! ## Errors
//! Operations never return `Err` or panic on remote failures. Each returns a [`ResultEnvelope`] with exactly one of `data` or `error` set:
//! a 200 response with a JSON body becomes `data` (as a [`ResponseBody`], which keeps fields this crate does not model), any other status surfaces the service's body as `error`, and transport failures or non-JSON bodies become a synthetic [`ErrorPayload`] with status 500.
//! The crate-wide [`Result`] alias and [`Error`] are only used when building a client.
//!
//! Required field combinations are enforced by the types: a mail carries a message, a template, or both ([`MailContent`]); an attachment has content, a URL, or both ([`AttachmentSource`]); a broadcast targets recipients, audiences, or both ([`BroadcastAudience`]).
//!
//! ## Example
//! ```no_run
//! use ensend_client::{Client, MailContent, SendMailMessage, Template};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ensend_client::Error> {
//!     let client = Client::builder().secret("sk_live_...").build()?;
//!
//!     let mail = SendMailMessage::new(
//!         "Welcome aboard",
//!         "noreply@ensend.co",
//!         vec!["jane@example.com"],
//!         MailContent::template(Template::new("welcome").variable("name", "Jane")),
//!     );
//!
//!     let result = client.send().send_mail_message(mail).await;
//!     match (result.data, result.error) {
//!         (Some(body), _) => println!("Sent: {:?}", body.data.map(|sent| sent.reference)),
//!         (_, Some(err)) => println!("Failed: {} ({})", err.message, err.status_code),
//!         _ => unreachable!(),
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod config;
mod error;
mod models;
mod transport;

pub use api::{AudienceApi, SendApi};
pub use client::{Client, ClientBuilder};
pub use config::{BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL, SECRET_ENV};
pub use error::{Error, ErrorPayload, ResponseBody, ResultEnvelope};
pub use models::{
    Attachment, AttachmentSource, Broadcast, BroadcastAudience, BroadcastOptions, CreateProfile,
    CreateProfileResponse, CreatedProfile, Invitation, MailContent, MailOptions, Mailbox, Profile,
    Recipients, SendExistingMailBroadcast, SendMailBroadcast, SendMailBroadcastResponse,
    SendMailMessage, SendMailMessageResponse, Sender, SentBroadcast, SentMessage, Template,
};
pub use transport::{Method, RequestEnvelope};

/// Result type alias for client construction.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

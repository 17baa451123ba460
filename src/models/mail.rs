//! Request and response shapes of the Send API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A name and address pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mailbox {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
}

impl Mailbox {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            name: None,
            address: address.into(),
        }
    }

    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: address.into(),
        }
    }
}

/// Sending identity: a bare address or a [`Mailbox`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Sender {
    Address(String),
    Mailbox(Mailbox),
}

impl Sender {
    /// The address part, regardless of shape.
    pub fn address(&self) -> &str {
        match self {
            Sender::Address(address) => address,
            Sender::Mailbox(mailbox) => &mailbox.address,
        }
    }
}

impl From<&str> for Sender {
    fn from(address: &str) -> Self {
        Sender::Address(address.to_string())
    }
}

impl From<String> for Sender {
    fn from(address: String) -> Self {
        Sender::Address(address)
    }
}

impl From<Mailbox> for Sender {
    fn from(mailbox: Mailbox) -> Self {
        Sender::Mailbox(mailbox)
    }
}

/// Recipients in any of the four shapes the service accepts.
///
/// The service normalizes these; the client sends them as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Recipients {
    Address(String),
    Addresses(Vec<String>),
    Mailbox(Mailbox),
    Mailboxes(Vec<Mailbox>),
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Recipients::Address(address.to_string())
    }
}

impl From<String> for Recipients {
    fn from(address: String) -> Self {
        Recipients::Address(address)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addresses: Vec<String>) -> Self {
        Recipients::Addresses(addresses)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(addresses: Vec<&str>) -> Self {
        Recipients::Addresses(addresses.into_iter().map(str::to_string).collect())
    }
}

impl From<Mailbox> for Recipients {
    fn from(mailbox: Mailbox) -> Self {
        Recipients::Mailbox(mailbox)
    }
}

impl From<Vec<Mailbox>> for Recipients {
    fn from(mailboxes: Vec<Mailbox>) -> Self {
        Recipients::Mailboxes(mailboxes)
    }
}

/// A server-stored template and the variables to render it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl Template {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

/// Body of a mail: a raw message, a template, or both. Never neither.
///
/// Every variant carries a message or a template, so a mail without content
/// cannot be built:
///
/// ```compile_fail
/// use ensend_client::MailContent;
///
/// // There is no empty variant.
/// let _ = MailContent::Neither;
/// ```
///
/// ```compile_fail
/// use ensend_client::SendMailMessage;
///
/// // Content is a required argument.
/// let _ = SendMailMessage::new("Hi", "noreply@ensend.co", "a@x.com");
/// ```
///
/// ```compile_fail
/// use ensend_client::MailContent;
///
/// // The field inside a variant is not optional.
/// let _ = MailContent::Message { message: None };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MailContent {
    Both { message: String, template: Template },
    Message { message: String },
    Template { template: Template },
}

impl MailContent {
    pub fn message(message: impl Into<String>) -> Self {
        MailContent::Message {
            message: message.into(),
        }
    }

    pub fn template(template: Template) -> Self {
        MailContent::Template { template }
    }

    pub fn both(message: impl Into<String>, template: Template) -> Self {
        MailContent::Both {
            message: message.into(),
            template,
        }
    }

    pub fn template_id(&self) -> Option<&str> {
        match self {
            MailContent::Both { template, .. } | MailContent::Template { template } => {
                Some(&template.id)
            }
            MailContent::Message { .. } => None,
        }
    }
}

/// Where an attachment's bytes come from: an inline data URI, a URL, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttachmentSource {
    Both { content: String, url: String },
    Content { content: String },
    Url { url: String },
}

/// A named attachment.
///
/// ```compile_fail
/// // An attachment always needs a source.
/// let _ = ensend_client::Attachment { name: "a.pdf".into() };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub name: String,
    #[serde(flatten)]
    pub source: AttachmentSource,
}

impl Attachment {
    pub fn new(name: impl Into<String>, source: AttachmentSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Attachment carried inline as a base64 data URI
    /// (e.g. `data:application/pdf;base64,...`).
    pub fn content(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            name,
            AttachmentSource::Content {
                content: content.into(),
            },
        )
    }

    /// Attachment fetched by the service from `url`.
    pub fn url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, AttachmentSource::Url { url: url.into() })
    }
}

/// Calendar invitation sent along with a mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Invitation {
    pub fn new(title: impl Into<String>, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start_date,
            end_date,
            url: None,
            description: None,
            location: None,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Delivery options of a single mail message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailOptions {
    /// Audience that recipients are added to on delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquiring_audience: Option<String>,
    /// Whether the service keeps the rendered content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_content: Option<bool>,
}

/// Delivery options of a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquiring_audience: Option<String>,
    /// Deferred delivery time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_for: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_content: Option<bool>,
}

/// Who a broadcast goes to: explicit recipients, audiences, or both.
///
/// A broadcast with neither recipients nor an audience cannot be built:
///
/// ```compile_fail
/// use ensend_client::BroadcastAudience;
///
/// let _ = BroadcastAudience::Neither;
/// ```
///
/// ```compile_fail
/// use ensend_client::{MailContent, SendMailBroadcast};
///
/// // The audience is a required argument.
/// let _ = SendMailBroadcast::new("Hi", "noreply@ensend.co", MailContent::message("hello"));
/// ```
///
/// ```compile_fail
/// use ensend_client::BroadcastAudience;
///
/// let _ = BroadcastAudience::Recipients {};
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BroadcastAudience {
    Both {
        recipients: Recipients,
        audience: Vec<String>,
    },
    Recipients {
        recipients: Recipients,
    },
    Audience {
        audience: Vec<String>,
    },
}

impl BroadcastAudience {
    pub fn recipients(recipients: impl Into<Recipients>) -> Self {
        BroadcastAudience::Recipients {
            recipients: recipients.into(),
        }
    }

    pub fn audience<I, S>(audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BroadcastAudience::Audience {
            audience: audience.into_iter().map(Into::into).collect(),
        }
    }

    pub fn both<I, S>(recipients: impl Into<Recipients>, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BroadcastAudience::Both {
            recipients: recipients.into(),
            audience: audience.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request body of `POST /send/mail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailMessage {
    subject: String,
    sender: Sender,
    recipients: Recipients,
    #[serde(flatten)]
    content: MailContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_address: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invitation: Option<Invitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<MailOptions>,
}

impl SendMailMessage {
    /// # Examples
    /// ```
    /// use ensend_client::{MailContent, SendMailMessage};
    ///
    /// let mail = SendMailMessage::new(
    ///     "Hello Ensend!",
    ///     "noreply@ensend.co",
    ///     "tenotea@smtpexpress.com",
    ///     MailContent::message("<i>reach your customers wherever they are</i>"),
    /// );
    /// ```
    pub fn new(
        subject: impl Into<String>,
        sender: impl Into<Sender>,
        recipients: impl Into<Recipients>,
        content: MailContent,
    ) -> Self {
        Self {
            subject: subject.into(),
            sender: sender.into(),
            recipients: recipients.into(),
            content,
            reply_address: None,
            attachments: Vec::new(),
            invitation: None,
            options: None,
        }
    }

    pub fn reply_address(mut self, address: impl Into<String>) -> Self {
        self.reply_address = Some(address.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn invitation(mut self, invitation: Invitation) -> Self {
        self.invitation = Some(invitation);
        self
    }

    pub fn options(mut self, options: MailOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub(crate) fn sender(&self) -> &Sender {
        &self.sender
    }

    pub(crate) fn content(&self) -> &MailContent {
        &self.content
    }
}

/// Request body for creating a broadcast on `POST /send/mail/broadast`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailBroadcast {
    subject: String,
    sender: Sender,
    #[serde(flatten)]
    audience: BroadcastAudience,
    #[serde(flatten)]
    content: MailContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_address: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invitation: Option<Invitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<BroadcastOptions>,
}

impl SendMailBroadcast {
    pub fn new(
        subject: impl Into<String>,
        sender: impl Into<Sender>,
        audience: BroadcastAudience,
        content: MailContent,
    ) -> Self {
        Self {
            subject: subject.into(),
            sender: sender.into(),
            audience,
            content,
            reply_address: None,
            attachments: Vec::new(),
            invitation: None,
            options: None,
        }
    }

    pub fn reply_address(mut self, address: impl Into<String>) -> Self {
        self.reply_address = Some(address.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn invitation(mut self, invitation: Invitation) -> Self {
        self.invitation = Some(invitation);
        self
    }

    pub fn options(mut self, options: BroadcastOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub(crate) fn sender(&self) -> &Sender {
        &self.sender
    }

    pub(crate) fn content(&self) -> &MailContent {
        &self.content
    }
}

/// Request body for appending recipients to an already processed broadcast.
///
/// Nothing else about the original broadcast can be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendExistingMailBroadcast {
    broadcast_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipients: Option<Recipients>,
}

impl SendExistingMailBroadcast {
    pub fn new(broadcast_ref: impl Into<String>) -> Self {
        Self {
            broadcast_ref: broadcast_ref.into(),
            recipients: None,
        }
    }

    pub fn recipients(mut self, recipients: impl Into<Recipients>) -> Self {
        self.recipients = Some(recipients.into());
        self
    }
}

/// `data` of a successful mail message send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentMessage {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A broadcast as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broadcast {
    #[serde(rename = "ref")]
    pub reference: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` of a successful broadcast call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentBroadcast {
    pub broadcast: Broadcast,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

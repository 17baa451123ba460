//! Data contracts exchanged with the service.

mod audience;
mod mail;

pub use audience::{CreateProfile, CreatedProfile, Profile};
pub use mail::{
    Attachment, AttachmentSource, Broadcast, BroadcastAudience, BroadcastOptions, Invitation,
    MailContent, MailOptions, Mailbox, Recipients, SendExistingMailBroadcast, SendMailBroadcast,
    SendMailMessage, Sender, SentBroadcast, SentMessage, Template,
};

use crate::error::ResponseBody;

/// Response of [`AudienceApi::create_profile`](crate::AudienceApi::create_profile).
pub type CreateProfileResponse = ResponseBody<CreatedProfile>;

/// Response of [`SendApi::send_mail_message`](crate::SendApi::send_mail_message).
pub type SendMailMessageResponse = ResponseBody<SentMessage>;

/// Response of both broadcast operations of [`SendApi`](crate::SendApi).
pub type SendMailBroadcastResponse = ResponseBody<SentBroadcast>;

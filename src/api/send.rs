use crate::error::ResultEnvelope;
use crate::models::{
    MailContent, SendExistingMailBroadcast, SendMailBroadcast, SendMailBroadcastResponse,
    SendMailMessage, SendMailMessageResponse, Sender,
};
use crate::Result;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::debug;

const MAIL_PATH: &str = "/send/mail";
// Path is spelled this way by the service.
const BROADCAST_PATH: &str = "/send/mail/broadast";

/// Mail and broadcast sending endpoints.
#[derive(Debug, Clone)]
pub struct SendApi {
    transport: Arc<Transport>,
}

impl SendApi {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Create and send a single mail message.
    ///
    /// # Examples
    /// ```no_run
    /// # use ensend_client::{Attachment, Client, MailContent, SendMailMessage};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ensend_client::Error> {
    /// let client = Client::builder().secret("sk_live_...").build()?;
    /// let mail = SendMailMessage::new(
    ///     "Hello Ensend!",
    ///     "noreply@ensend.co",
    ///     "tenotea@smtpexpress.com",
    ///     MailContent::message("<i>reach your customers wherever they are</i>"),
    /// )
    /// .attachment(Attachment::url("Attachment.pdf", "https://link-to-file.pdf"));
    ///
    /// match client.send().send_mail_message(mail).await.into_result() {
    ///     Ok(body) => println!("{}: {:?}", body.message, body.data.map(|d| d.reference)),
    ///     Err(err) => eprintln!("rejected: {err}"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_mail_message(
        &self,
        input: SendMailMessage,
    ) -> ResultEnvelope<SendMailMessageResponse> {
        if let Err(err) = self.check_known(input.sender(), input.content()) {
            debug!(error = %err, "Rejected before dispatch");
            return ResultEnvelope::err(err);
        }
        self.transport.post(MAIL_PATH, &input).await
    }

    /// Create and send a broadcast to recipients, audiences, or both.
    pub async fn send_mail_broadcast(
        &self,
        input: SendMailBroadcast,
    ) -> ResultEnvelope<SendMailBroadcastResponse> {
        if let Err(err) = self.check_known(input.sender(), input.content()) {
            debug!(error = %err, "Rejected before dispatch");
            return ResultEnvelope::err(err);
        }
        self.transport.post(BROADCAST_PATH, &input).await
    }

    /// Deliver a previously processed broadcast to new recipients.
    ///
    /// No other field of the original broadcast can be changed.
    pub async fn send_existing_mail_broadcast(
        &self,
        input: SendExistingMailBroadcast,
    ) -> ResultEnvelope<SendMailBroadcastResponse> {
        self.transport.post(BROADCAST_PATH, &input).await
    }

    /// Reject senders and templates outside the configured lists, if any.
    fn check_known(&self, sender: &Sender, content: &MailContent) -> Result<()> {
        let config = self.transport.config();
        config.check_identity(sender.address())?;
        if let Some(id) = content.template_id() {
            config.check_template(id)?;
        }
        Ok(())
    }
}

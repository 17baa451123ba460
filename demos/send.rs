//! Send one mail message using the secret from `ENSEND_PROJECT_SECRET`.
//!
//! Usage: `cargo run --example send -- <sender> <recipient>`

use ensend_client::{Client, MailContent, MailOptions, SendMailMessage};

#[tokio::main]
async fn main() -> Result<(), ensend_client::Error> {
    let mut args = std::env::args().skip(1);
    let sender = args.next().unwrap_or_else(|| "noreply@ensend.co".to_string());
    let recipient = args.next().unwrap_or_else(|| "tenotea@smtpexpress.com".to_string());

    let client = Client::new()?;
    println!("Using {}", client.config().base_url());

    let mail = SendMailMessage::new(
        "Hello Ensend!",
        sender,
        recipient,
        MailContent::message("<i>reach your customers wherever they are</i>"),
    )
    .options(MailOptions {
        store_content: Some(false),
        ..Default::default()
    });

    match client.send().send_mail_message(mail).await.into_result() {
        Ok(body) => match body.data {
            Some(sent) => println!("Sent: {} ({})", sent.reference, body.message),
            None => println!("Accepted without a ref: {}", body.message),
        },
        Err(err) => println!("Failed: {err}"),
    }

    Ok(())
}

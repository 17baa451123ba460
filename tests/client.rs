use ensend_client::{
    Attachment, BroadcastAudience, Client, CreateProfile, ErrorPayload, MailContent, Mailbox,
    RequestEnvelope, SendExistingMailBroadcast, SendMailBroadcast, SendMailMessage, Template,
};
use httpmock::prelude::*;
use serde_json::json;

const SECRET: &str = "sk_test_123";

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .secret(SECRET)
        .base_url(server.base_url())
        .build()
        .unwrap()
}

fn welcome_mail() -> SendMailMessage {
    SendMailMessage::new(
        "Hello Ensend!",
        "noreply@ensend.co",
        "tenotea@smtpexpress.com",
        MailContent::message("<i>reach your customers wherever they are</i>"),
    )
}

#[tokio::test]
async fn create_profile_returns_body_as_data() {
    let server = MockServer::start_async().await;
    let body = json!({
        "message": "ok",
        "statusCode": 200,
        "data": {
            "profile": {
                "ref": "p_1",
                "name": "Jane",
                "identity": "jane@x.com",
                "type": "contact",
                "status": "active",
                "createdAt": "2024-01-01T00:00:00Z"
            }
        }
    });
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/project/audience/profile/create")
                .json_body(json!({
                    "audienceId": "a1",
                    "name": "Jane",
                    "identity": "jane@x.com",
                    "sendConsentEmail": true
                }));
            then.status(200).json_body(body.clone());
        })
        .await;

    let result = client_for(&server)
        .audience()
        .create_profile(CreateProfile::new("a1", "Jane", "jane@x.com", true))
        .await;

    mock.assert_async().await;
    assert!(result.error.is_none());
    let data = result.data.expect("data should be set");
    assert_eq!(serde_json::to_value(&data).unwrap(), body);
    let profile = data.data.expect("profile data").profile;
    assert_eq!(profile.reference, "p_1");
    assert_eq!(profile.kind, "contact");
}

#[tokio::test]
async fn existing_broadcast_rejection_is_returned_as_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/send/mail/broadast")
                .json_body(json!({"broadcastRef": "b_1", "recipients": ["new@x.com"]}));
            then.status(422)
                .json_body(json!({"message": "broadcast already sent", "statusCode": 422}));
        })
        .await;

    let result = client_for(&server)
        .send()
        .send_existing_mail_broadcast(
            SendExistingMailBroadcast::new("b_1").recipients(vec!["new@x.com"]),
        )
        .await;

    mock.assert_async().await;
    assert!(result.data.is_none());
    assert_eq!(
        result.error,
        Some(ErrorPayload::new("broadcast already sent", 422))
    );
}

#[tokio::test]
async fn mail_message_sends_headers_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/send/mail")
                .header("authorization", format!("Bearer {SECRET}"))
                .header("content-type", "application/json")
                .json_body(json!({
                    "subject": "Hello Ensend!",
                    "sender": "noreply@ensend.co",
                    "recipients": "tenotea@smtpexpress.com",
                    "message": "<i>reach your customers wherever they are</i>",
                    "attachments": [
                        {"name": "Attachment.pdf", "url": "https://link-to-file.pdf"}
                    ]
                }));
            then.status(200)
                .json_body(json!({"message": "sent", "statusCode": 200, "data": {"ref": "m_1"}}));
        })
        .await;

    let result = client_for(&server)
        .send()
        .send_mail_message(
            welcome_mail().attachment(Attachment::url("Attachment.pdf", "https://link-to-file.pdf")),
        )
        .await;

    mock.assert_async().await;
    let body = result.into_result().unwrap();
    assert_eq!(body.data.unwrap().reference, "m_1");
    assert_eq!(body.status_code, 200);
}

#[tokio::test]
async fn mail_broadcast_uses_broadcast_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/send/mail/broadast").json_body(json!({
                "subject": "Weekly digest",
                "sender": {"name": "Ensend", "address": "noreply@ensend.co"},
                "recipients": ["a@x.com"],
                "audience": ["aud_1"],
                "template": {"id": "digest", "variables": {"week": "12"}}
            }));
            then.status(200).json_body(json!({
                "message": "queued",
                "statusCode": 200,
                "data": {"broadcast": {"ref": "b_9", "status": "pending"}}
            }));
        })
        .await;

    let broadcast = SendMailBroadcast::new(
        "Weekly digest",
        Mailbox::named("Ensend", "noreply@ensend.co"),
        BroadcastAudience::both(vec!["a@x.com"], ["aud_1"]),
        MailContent::template(Template::new("digest").variable("week", "12")),
    );
    let result = client_for(&server)
        .send()
        .send_mail_broadcast(broadcast)
        .await;

    mock.assert_async().await;
    let body = result.into_result().unwrap();
    let broadcast = body.data.unwrap().broadcast;
    assert_eq!(broadcast.reference, "b_9");
    assert_eq!(broadcast.status, "pending");
}

#[tokio::test]
async fn only_status_200_counts_as_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/send/mail");
            then.status(201)
                .json_body(json!({"message": "created", "statusCode": 201}));
        })
        .await;

    let result = client_for(&server).send().send_mail_message(welcome_mail()).await;

    assert!(result.data.is_none());
    assert_eq!(result.error.unwrap().status_code, 201);
}

#[tokio::test]
async fn network_failure_yields_synthetic_500() {
    // Nothing listens on port 1.
    let client = Client::builder()
        .secret(SECRET)
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let result = client.send().send_mail_message(welcome_mail()).await;

    assert!(result.data.is_none());
    let error = result.error.expect("transport failures must set error");
    assert_eq!(error.status_code, 500);
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn unparseable_body_yields_synthetic_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/send/mail");
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let result = client_for(&server).send().send_mail_message(welcome_mail()).await;

    assert!(result.data.is_none());
    assert_eq!(result.error.unwrap().status_code, 500);
}

#[tokio::test]
async fn success_body_with_unexpected_data_is_still_success() {
    let server = MockServer::start_async().await;
    let body = json!({"message": "ok", "statusCode": 200, "data": {"id": 1}});
    server
        .mock_async(|when, then| {
            when.method(POST).path("/send/mail");
            then.status(200).json_body(body.clone());
        })
        .await;

    let result = client_for(&server).send().send_mail_message(welcome_mail()).await;

    assert!(result.error.is_none());
    let data = result.data.expect("a 200 with JSON is success");
    assert!(data.data.is_none());
    assert_eq!(data.extra["data"], json!({"id": 1}));
    assert_eq!(serde_json::to_value(&data).unwrap(), body);
}

#[tokio::test]
async fn success_body_with_null_data_is_still_success() {
    let server = MockServer::start_async().await;
    let body = json!({"message": "queued", "statusCode": 200, "data": null});
    server
        .mock_async(|when, then| {
            when.method(POST).path("/project/audience/profile/create");
            then.status(200).json_body(body.clone());
        })
        .await;

    let result = client_for(&server)
        .audience()
        .create_profile(CreateProfile::new("a1", "Jane", "jane@x.com", false))
        .await;

    assert!(result.error.is_none());
    let data = result.data.expect("a 200 with JSON is success");
    assert!(data.data.is_none());
    assert_eq!(data.message, "queued");
    assert_eq!(serde_json::to_value(&data).unwrap(), body);
}

#[tokio::test]
async fn success_body_keeps_unknown_fields() {
    let server = MockServer::start_async().await;
    let body = json!({
        "message": "ok",
        "statusCode": 200,
        "requestId": "r_1",
        "data": {
            "profile": {
                "ref": "p_1",
                "name": "Jane",
                "identity": "jane@x.com",
                "type": "contact",
                "status": "active",
                "createdAt": "2024-01-01T00:00:00Z",
                "audienceId": "a1"
            }
        }
    });
    server
        .mock_async(|when, then| {
            when.method(POST).path("/project/audience/profile/create");
            then.status(200).json_body(body.clone());
        })
        .await;

    let result = client_for(&server)
        .audience()
        .create_profile(CreateProfile::new("a1", "Jane", "jane@x.com", true))
        .await;

    let data = result.data.expect("data should be set");
    assert_eq!(data.extra["requestId"], json!("r_1"));
    assert_eq!(
        data.data.as_ref().unwrap().profile.extra["audienceId"],
        json!("a1")
    );
    assert_eq!(serde_json::to_value(&data).unwrap(), body);
}

#[tokio::test]
async fn error_body_without_message_is_wrapped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/send/mail");
            then.status(503).json_body(json!({"detail": "maintenance"}));
        })
        .await;

    let result = client_for(&server).send().send_mail_message(welcome_mail()).await;

    let error = result.error.unwrap();
    assert_eq!(error.status_code, 503);
    assert_eq!(error.extra["body"], json!({"detail": "maintenance"}));
}

#[tokio::test]
async fn raw_get_request_carries_no_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/project")
                .header("authorization", format!("Bearer {SECRET}"))
                .matches(|req| req.body.as_ref().is_none_or(|b| b.is_empty()));
            then.status(200).json_body(json!({"name": "demo"}));
        })
        .await;

    let result = client_for(&server)
        .request::<serde_json::Value>(RequestEnvelope::get("/project"))
        .await;

    mock.assert_async().await;
    assert_eq!(result.data, Some(json!({"name": "demo"})));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn unknown_identity_is_rejected_without_a_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/send/mail");
            then.status(200)
                .json_body(json!({"message": "sent", "statusCode": 200, "data": {"ref": "m_1"}}));
        })
        .await;

    let client = Client::builder()
        .secret(SECRET)
        .base_url(server.base_url())
        .identities(["hello@ensend.co"])
        .build()
        .unwrap();

    let result = client.send().send_mail_message(welcome_mail()).await;

    mock.assert_hits_async(0).await;
    assert!(result.data.is_none());
    let error = result.error.unwrap();
    assert_eq!(error.status_code, 400);
    assert!(error.message.contains("noreply@ensend.co"));
}

#[tokio::test]
async fn unknown_template_is_rejected_for_broadcasts() {
    let client = Client::builder()
        .secret(SECRET)
        .base_url("http://127.0.0.1:1")
        .templates(["welcome"])
        .build()
        .unwrap();

    let broadcast = SendMailBroadcast::new(
        "Digest",
        "noreply@ensend.co",
        BroadcastAudience::audience(["aud_1"]),
        MailContent::template(Template::new("digest")),
    );
    let result = client.send().send_mail_broadcast(broadcast).await;

    assert_eq!(result.error.unwrap().status_code, 400);
}

#[test]
fn explicit_secret_is_kept_in_config() {
    let client = Client::builder()
        .secret("explicit")
        .base_url("http://localhost:9/")
        .build()
        .unwrap();
    assert_eq!(client.config().secret(), "explicit");
    assert_eq!(client.config().base_url(), "http://localhost:9");
}

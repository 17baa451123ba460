//! The single HTTP round trip every operation goes through.

use crate::config::ClientConfig;
use crate::error::{ErrorPayload, ResultEnvelope};
use crate::{Error, Result};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// HTTP method of a [`RequestEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Get,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Post => reqwest::Method::POST,
            Method::Get => reqwest::Method::GET,
        }
    }
}

/// One outbound request: method, path relative to the base URL, and a JSON body.
///
/// The body is only sent for [`Method::Post`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

impl RequestEnvelope {
    /// POST request sending `body` as JSON.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
        }
    }

    /// GET request; never carries a body.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: Value::Object(Map::new()),
        }
    }
}

/// Shared transport bound to one [`ClientConfig`].
#[derive(Debug)]
pub(crate) struct Transport {
    http: reqwest::Client,
    config: ClientConfig,
    authorization: HeaderValue,
}

impl Transport {
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.secret()))
            .map_err(|_| Error::InvalidSecret)?;
        authorization.set_sensitive(true);

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            config,
            authorization,
        })
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Serialize `body` and POST it to `path`.
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ResultEnvelope<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        match serde_json::to_value(body) {
            Ok(body) => self.call(RequestEnvelope::post(path, body)).await,
            Err(err) => ResultEnvelope::err(Error::from(err)),
        }
    }

    /// Perform one request and fold every outcome into a [`ResultEnvelope`].
    ///
    /// - 200: the body is decoded into `T` and returned as `data`.
    /// - any other status: the body is returned as `error`.
    /// - transport failure or a body that is not JSON: a synthetic
    ///   `{message, statusCode: 500}` error.
    ///
    /// The typed operations decode into [`ResponseBody`](crate::ResponseBody),
    /// which accepts any JSON, so a 200 with JSON never becomes an error there.
    /// A caller-chosen `T` on the raw path that rejects the body yields a 500.
    pub(crate) async fn call<T>(&self, request: RequestEnvelope) -> ResultEnvelope<T>
    where
        T: DeserializeOwned,
    {
        let path = request.path.clone();
        match self.try_call(request).await {
            Ok(envelope) => envelope,
            Err(err) => {
                debug!(path = %path, error = %err, "Request failed before a usable response");
                ResultEnvelope::err(err)
            }
        }
    }

    async fn try_call<T>(&self, request: RequestEnvelope) -> Result<ResultEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url(), request.path);
        debug!(method = ?request.method, url = %url, "Dispatching request");

        let mut builder = self
            .http
            .request(request.method.into(), &url)
            .headers(self.headers());

        if request.method == Method::Post {
            builder = builder.body(serde_json::to_vec(&request.body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), path = %request.path, "Received response");

        let body: Value = serde_json::from_slice(&bytes)?;

        if status == StatusCode::OK {
            Ok(ResultEnvelope::ok(serde_json::from_value(body)?))
        } else {
            Ok(ResultEnvelope::err(Self::error_payload(status, body)))
        }
    }

    /// Interpret a non-200 JSON body as an error payload.
    ///
    /// Bodies that do not carry `message`/`statusCode` are wrapped under a
    /// `body` key with the HTTP status.
    fn error_payload(status: StatusCode, body: Value) -> ErrorPayload {
        match serde_json::from_value::<ErrorPayload>(body.clone()) {
            Ok(payload) => payload,
            Err(_) => {
                let mut payload = ErrorPayload::new(
                    status.canonical_reason().unwrap_or("Unexpected response"),
                    status.as_u16(),
                );
                payload.extra.insert("body".to_string(), body);
                payload
            }
        }
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_envelope_has_empty_body() {
        let request = RequestEnvelope::get("/project");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.body, json!({}));
    }

    #[test]
    fn error_payload_passthrough() {
        let payload = Transport::error_payload(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"message": "broadcast already sent", "statusCode": 422}),
        );
        assert_eq!(payload, ErrorPayload::new("broadcast already sent", 422));
    }

    #[test]
    fn error_payload_wraps_foreign_bodies() {
        let payload = Transport::error_payload(StatusCode::BAD_GATEWAY, json!(["upstream"]));
        assert_eq!(payload.status_code, 502);
        assert_eq!(payload.message, "Bad Gateway");
        assert_eq!(payload.extra["body"], json!(["upstream"]));
    }

    #[test]
    fn secret_with_newline_is_rejected() {
        let config = ClientConfig::resolve(Some("bad\nsecret".into()), None, |_| None).unwrap();
        assert!(matches!(Transport::new(config), Err(Error::InvalidSecret)));
    }
}

//! Error types and the `{data, error}` result envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Status code attached to synthetic payloads for failures that never got a
/// usable answer from the service.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Status code attached to synthetic payloads for requests rejected locally.
pub const LOCAL_REJECTION_STATUS: u16 = 400;

/// Status assumed for a success body that does not state its own.
const SUCCESS_STATUS: u16 = 200;

/// Errors raised while building a client or performing a request.
///
/// Operations never return this type directly; the transport folds it into an
/// [`ErrorPayload`] so that callers always receive a [`ResultEnvelope`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure, connection refusal, or unreadable response.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A body could not be encoded or a response did not match its schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No secret was passed explicitly or found in the environment.
    #[error("No project secret configured; pass one to the builder or set ENSEND_PROJECT_SECRET")]
    MissingSecret,

    /// The secret contains characters that are not valid in an HTTP header.
    #[error("Project secret is not a valid header value")]
    InvalidSecret,

    /// The sender address is not one of the configured identities.
    #[error("Sender identity `{0}` is not in the configured identities")]
    UnknownIdentity(String),

    /// The template id is not one of the configured template ids.
    #[error("Template `{0}` is not in the configured template ids")]
    UnknownTemplate(String),
}

impl Error {
    fn status_code(&self) -> u16 {
        match self {
            Error::UnknownIdentity(_) | Error::UnknownTemplate(_) => LOCAL_REJECTION_STATUS,
            _ => TRANSPORT_FAILURE_STATUS,
        }
    }
}

/// Error body returned by the service, or synthesized for local failures.
///
/// Fields beyond `message` and `statusCode` are kept in [`extra`](Self::extra)
/// so remote errors are surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
    pub status_code: u16,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorPayload {
    /// Create a payload with no extra fields.
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            extra: Map::new(),
        }
    }
}

impl From<Error> for ErrorPayload {
    fn from(err: Error) -> Self {
        ErrorPayload::new(err.to_string(), err.status_code())
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (status {})", self.message, self.status_code)
    }
}

impl std::error::Error for ErrorPayload {}

/// Success body of the service: `{message, statusCode, data}`.
///
/// Decoding never fails for a JSON body. When `data` is absent it is `None`;
/// when it does not match `T` it is `None` and the raw value stays in
/// [`extra`](Self::extra) under `"data"`. A body that is not an object is kept
/// under `"body"`. For a body carrying `message` and `statusCode`, serializing
/// the result reproduces the body that was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody<T> {
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de, T> Deserialize<'de> for ResponseBody<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = match Value::deserialize(deserializer)? {
            Value::Object(fields) => fields,
            other => {
                let mut extra = Map::new();
                extra.insert("body".to_string(), other);
                return Ok(Self {
                    message: String::new(),
                    status_code: SUCCESS_STATUS,
                    data: None,
                    extra,
                });
            }
        };

        let message = take_field(&mut fields, "message", |v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let status_code = take_field(&mut fields, "statusCode", |v| {
            v.as_u64().and_then(|n| u16::try_from(n).ok())
        })
        .unwrap_or(SUCCESS_STATUS);
        let data = take_field(&mut fields, "data", |v| {
            serde_json::from_value::<T>(v.clone()).ok()
        });

        Ok(Self {
            message,
            status_code,
            data,
            extra: fields,
        })
    }
}

/// Remove `key` from `fields` only if `parse` accepts its value.
fn take_field<U>(
    fields: &mut Map<String, Value>,
    key: &str,
    parse: impl Fn(&Value) -> Option<U>,
) -> Option<U> {
    let parsed = fields.get(key).and_then(parse)?;
    fields.remove(key);
    Some(parsed)
}

/// Outcome of one call: exactly one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEnvelope<T> {
    pub data: Option<T>,
    pub error: Option<ErrorPayload>,
}

impl<T> ResultEnvelope<T> {
    /// Envelope carrying `data` and no error.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Envelope carrying `error` and no data.
    pub fn err(error: impl Into<ErrorPayload>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    /// `true` when `data` is set.
    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    /// `true` when `error` is set.
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Convert into a standard `Result` for use with `?`.
    ///
    /// # Examples
    /// ```
    /// use ensend_client::{ErrorPayload, ResultEnvelope};
    ///
    /// let envelope: ResultEnvelope<u8> = ResultEnvelope::err(ErrorPayload::new("nope", 422));
    /// assert_eq!(envelope.into_result().unwrap_err().status_code, 422);
    /// ```
    pub fn into_result(self) -> std::result::Result<T, ErrorPayload> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ErrorPayload::new(
                "Empty result envelope",
                TRANSPORT_FAILURE_STATUS,
            )),
        }
    }
}

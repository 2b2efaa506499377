//! HTTP transport: one logical operation, one round trip, one classified outcome.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

use crate::config::IdswyftConfig;
use crate::error::{IdswyftError, Result};
use crate::file::{FileSource, UPLOAD_MIME};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// User-agent marker identifying SDK name and version, stable per release.
pub const USER_AGENT: &str = concat!("idswyft-rust/", env!("CARGO_PKG_VERSION"));

/// A file payload normalized at call time: field name plus byte buffer.
pub(crate) struct PreparedFile {
    field: &'static str,
    bytes: Vec<u8>,
}

impl PreparedFile {
    /// Read the source into memory under the conventional field name.
    pub(crate) fn new(field: &'static str, source: FileSource) -> Result<Self> {
        Ok(Self {
            field,
            bytes: source.into_bytes()?,
        })
    }
}

/// Form fields and query parameters, present keys only.
pub(crate) type Params = Vec<(&'static str, String)>;

/// The one session resource owned by a client instance.
///
/// Wraps a `reqwest::Client`, which is internally reference-counted and safe
/// for concurrent reuse; the connection pool is released when the last clone
/// drops. Identification headers and the configured timeout ride on every
/// request.
#[derive(Clone, Debug)]
pub(crate) struct Transport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Transport {
    pub(crate) fn new(config: &IdswyftConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| IdswyftError::Config("API key contains invalid header characters".into()))?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(
            "X-SDK-Version",
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        );
        headers.insert("X-SDK-Language", HeaderValue::from_static("rust"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| IdswyftError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// Issue one request and decode the outcome.
    ///
    /// 200/201 bodies are parsed as JSON; an unparsable success body becomes
    /// the `{"message": "Success"}` marker because the call still succeeded at
    /// the transport level. Every other status is classified exactly once via
    /// [`classify`]. Transport failures never reach the classifier.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        form: Option<Params>,
        files: Option<Vec<PreparedFile>>,
        query: Option<Params>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, "dispatching Idswyft API request");

        let mut builder = self.client.request(method, &url);
        if let Some(query) = &query {
            builder = builder.query(query);
        }
        builder = match (form, files) {
            (form, Some(files)) => {
                let mut multipart = Form::new();
                for (name, value) in form.unwrap_or_default() {
                    multipart = multipart.text(name, value);
                }
                for PreparedFile { field, bytes } in files {
                    let part = Part::bytes(bytes)
                        .file_name(field)
                        .mime_str(UPLOAD_MIME)
                        .map_err(|e| {
                            IdswyftError::InvalidFile(format!("Failed to prepare upload: {e}"))
                        })?;
                    multipart = multipart.part(field, part);
                }
                builder.multipart(multipart)
            }
            (Some(form), None) => builder.form(&form),
            (None, None) => builder,
        };

        let response = builder.send().await.map_err(|e| self.network_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.network_error(e))?;

        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(serde_json::from_str(&text)
                .unwrap_or_else(|_| json!({"message": "Success"})));
        }

        let error_body = serde_json::from_str(&text)
            .unwrap_or_else(|_| json!({"error": "Unknown error", "message": text}));
        debug!(status = status.as_u16(), "classifying Idswyft API error");
        Err(classify(status.as_u16(), &error_body))
    }

    fn network_error(&self, err: reqwest::Error) -> IdswyftError {
        if err.is_timeout() {
            IdswyftError::Network(format!(
                "Request timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else {
            err.into()
        }
    }
}

/// Map a non-2xx status and decoded error body onto the error taxonomy.
///
/// The single classification point for the whole SDK: callers catch by error
/// kind instead of inspecting status codes. Missing body keys get defaults,
/// never a panic.
pub(crate) fn classify(status: u16, body: &Value) -> IdswyftError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("API request failed")
        .to_string();

    match status {
        400 => IdswyftError::Validation {
            message,
            field: body.get("field").and_then(Value::as_str).map(String::from),
            validation_errors: body
                .get("details")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        },
        401 => IdswyftError::Authentication(message),
        404 => IdswyftError::NotFound {
            resource: body
                .get("resource")
                .and_then(Value::as_str)
                .unwrap_or("Resource")
                .to_string(),
        },
        429 => IdswyftError::RateLimit {
            message,
            retry_after: body.get("retry_after").and_then(Value::as_u64),
        },
        500..=599 => IdswyftError::Server(message),
        _ => IdswyftError::Api {
            status,
            message,
            code: body.get("code").and_then(Value::as_str).map(String::from),
            details: body.get("details").cloned(),
        },
    }
}

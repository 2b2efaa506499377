//! Main client for the Idswyft identity verification API.

use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use url::Url;

use crate::config::IdswyftConfig;
use crate::error::{IdswyftError, Result};
use crate::file::FileSource;
use crate::transport::{Params, PreparedFile, Transport};
use crate::types::{
    self, ApiActivityPage, ApiMessage, ChallengeType, CreatedApiKey, DeveloperRegistration,
    DocumentType, Environment, HealthStatus, LiveTokenResponse, StartVerificationResponse,
    UsageStats, VerificationList, VerificationRecord, VerificationStatus, Webhook,
    WebhookDeliveryPage, WebhookTestResult,
};
use crate::webhook;

/// Parameters for [`IdswyftClient::verify_document`].
#[derive(Debug)]
pub struct VerifyDocumentRequest {
    /// Type of document being uploaded.
    pub document_type: DocumentType,
    /// Front-of-document image.
    pub document: FileSource,
    /// Bind the upload to an existing session; omit to create a new
    /// verification implicitly.
    pub verification_id: Option<String>,
    pub user_id: Option<String>,
    pub webhook_url: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl VerifyDocumentRequest {
    /// Create a request with the required fields.
    pub fn new(document_type: DocumentType, document: impl Into<FileSource>) -> Self {
        Self {
            document_type,
            document: document.into(),
            verification_id: None,
            user_id: None,
            webhook_url: None,
            metadata: None,
        }
    }

    /// Bind to an existing verification session.
    pub fn verification_id(mut self, id: impl Into<String>) -> Self {
        self.verification_id = Some(id.into());
        self
    }

    /// With user identifier.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// With a webhook URL for status updates.
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Attach a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Parameters for [`IdswyftClient::verify_selfie`].
#[derive(Debug)]
pub struct VerifySelfieRequest {
    /// Selfie image.
    pub selfie: FileSource,
    /// Bind the upload to an existing session; omit to create a new
    /// verification implicitly.
    pub verification_id: Option<String>,
    /// Document to face-match against.
    pub reference_document_id: Option<String>,
    pub user_id: Option<String>,
    pub webhook_url: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl VerifySelfieRequest {
    /// Create a request with the required fields.
    pub fn new(selfie: impl Into<FileSource>) -> Self {
        Self {
            selfie: selfie.into(),
            verification_id: None,
            reference_document_id: None,
            user_id: None,
            webhook_url: None,
            metadata: None,
        }
    }

    /// Bind to an existing verification session.
    pub fn verification_id(mut self, id: impl Into<String>) -> Self {
        self.verification_id = Some(id.into());
        self
    }

    /// Face-match against a previously uploaded document.
    pub fn reference_document_id(mut self, id: impl Into<String>) -> Self {
        self.reference_document_id = Some(id.into());
        self
    }

    /// With user identifier.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// With a webhook URL for status updates.
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Attach a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Parameters for [`IdswyftClient::verify_back_of_id`].
#[derive(Debug)]
pub struct VerifyBackOfIdRequest {
    /// Existing verification session, started by a front-of-document upload.
    pub verification_id: String,
    pub document_type: DocumentType,
    /// Back-of-document image, barcode side.
    pub back_of_id: FileSource,
    pub metadata: Option<Map<String, Value>>,
}

impl VerifyBackOfIdRequest {
    /// Create a request with the required fields.
    pub fn new(
        verification_id: impl Into<String>,
        document_type: DocumentType,
        back_of_id: impl Into<FileSource>,
    ) -> Self {
        Self {
            verification_id: verification_id.into(),
            document_type,
            back_of_id: back_of_id.into(),
            metadata: None,
        }
    }

    /// Attach a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Parameters for [`IdswyftClient::live_capture`].
#[derive(Debug)]
pub struct LiveCaptureRequest {
    /// Existing verification session.
    pub verification_id: String,
    /// Base64-encoded capture frame.
    pub live_image_data: String,
    /// Response to the issued challenge (blink, smile, ...).
    pub challenge_response: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl LiveCaptureRequest {
    /// Create a request with the required fields.
    pub fn new(verification_id: impl Into<String>, live_image_data: impl Into<String>) -> Self {
        Self {
            verification_id: verification_id.into(),
            live_image_data: live_image_data.into(),
            challenge_response: None,
            metadata: None,
        }
    }

    /// With a challenge response.
    pub fn challenge_response(mut self, response: impl Into<String>) -> Self {
        self.challenge_response = Some(response.into());
        self
    }

    /// Attach a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Pagination window for list endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PageQuery {
    /// Limit the page size (server default 100, max 1000).
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` entries.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn into_params(self) -> Params {
        let mut params = Params::new();
        push_opt(&mut params, "limit", self.limit.map(|v| v.to_string()));
        push_opt(&mut params, "offset", self.offset.map(|v| v.to_string()));
        params
    }
}

/// Filters for [`IdswyftClient::list_verifications`].
#[derive(Debug, Clone, Default)]
pub struct ListVerificationsQuery {
    pub status: Option<VerificationStatus>,
    pub user_id: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListVerificationsQuery {
    /// Filter by lifecycle status.
    pub fn status(mut self, status: VerificationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by user.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Limit the page size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` entries.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Filters for [`IdswyftClient::get_api_activity`].
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// ISO-8601 start of the window.
    pub start_date: Option<String>,
    /// ISO-8601 end of the window.
    pub end_date: Option<String>,
}

impl ActivityQuery {
    /// Limit the page size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` entries.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Start of the date window.
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// End of the date window.
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }
}

/// Parameters for [`IdswyftClient::register_webhook`].
#[derive(Debug, Clone)]
pub struct RegisterWebhookRequest {
    pub url: String,
    /// Event names to subscribe to; omit for the server default set.
    pub events: Option<Vec<String>>,
    /// Shared secret for signature verification.
    pub secret: Option<String>,
}

impl RegisterWebhookRequest {
    /// Create a request for the given callback URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            events: None,
            secret: None,
        }
    }

    /// Subscribe to specific events.
    pub fn events(mut self, events: Vec<String>) -> Self {
        self.events = Some(events);
        self
    }

    /// With a signing secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Parameters for [`IdswyftClient::update_webhook`].
///
/// An omitted field means "leave unchanged"; an explicitly set field is an
/// update intent, so an empty events list clears the subscription rather
/// than being dropped from the request.
#[derive(Debug, Clone, Default)]
pub struct UpdateWebhookRequest {
    pub url: Option<String>,
    pub events: Option<Vec<String>>,
    pub secret: Option<String>,
}

impl UpdateWebhookRequest {
    /// Change the callback URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Replace the subscribed events; an empty list clears them.
    pub fn events(mut self, events: Vec<String>) -> Self {
        self.events = Some(events);
        self
    }

    /// Rotate the signing secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Client for the Idswyft identity verification API.
///
/// Each call is one stateless round trip; the server-side verification
/// lifecycle (`pending -> verified | failed | manual_review`) is only ever
/// observed through status and result snapshots, never cached locally. The
/// client owns one HTTP session resource, created at construction and
/// released on drop; clones share it and concurrent calls are safe.
///
/// # Example
///
/// ```rust,ignore
/// use idswyft::{IdswyftClient, VerifyDocumentRequest, DocumentType};
///
/// let client = IdswyftClient::new("your-api-key")?;
/// let record = client
///     .verify_document(
///         VerifyDocumentRequest::new(DocumentType::Passport, "passport.jpg")
///             .user_id("user-123"),
///     )
///     .await?;
/// println!("{:?}", record.status);
/// ```
#[derive(Clone, Debug)]
pub struct IdswyftClient {
    transport: Transport,
    sandbox: bool,
}

impl IdswyftClient {
    /// Create a client with the default configuration and the given API key.
    ///
    /// Fails with [`IdswyftError::Config`] before any network activity when
    /// the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(IdswyftConfig::builder().api_key(api_key).build())
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(config: IdswyftConfig) -> Result<Self> {
        if config.api_key.expose_secret().is_empty() {
            return Err(IdswyftError::Config("API key is required".into()));
        }
        Url::parse(&config.base_url)
            .map_err(|e| IdswyftError::Config(format!("Invalid base URL: {e}")))?;

        Ok(Self {
            transport: Transport::new(&config)?,
            sandbox: config.sandbox,
        })
    }

    // ── Verification ─────────────────────────────────────────────────

    /// Start a new verification session for a user.
    ///
    /// A per-call `sandbox` value overrides the client-level flag; when both
    /// are absent/false nothing is sent and the server default applies.
    pub async fn start_verification(
        &self,
        user_id: &str,
        sandbox: Option<bool>,
    ) -> Result<StartVerificationResponse> {
        let mut form: Params = vec![("user_id", user_id.to_string())];
        match sandbox {
            Some(value) => form.push(("sandbox", value.to_string())),
            None if self.sandbox => form.push(("sandbox", "true".to_string())),
            None => {}
        }

        let body = self
            .transport
            .request(Method::POST, "/api/verify/start", Some(form), None, None)
            .await?;
        types::decode(body)
    }

    /// Upload a government-issued document for verification.
    pub async fn verify_document(&self, request: VerifyDocumentRequest) -> Result<VerificationRecord> {
        let mut form: Params = vec![("document_type", request.document_type.as_str().to_string())];
        push_opt(&mut form, "verification_id", request.verification_id);
        push_opt(&mut form, "user_id", request.user_id);
        push_opt(&mut form, "webhook_url", request.webhook_url);
        push_metadata(&mut form, request.metadata);

        let file = PreparedFile::new("document", request.document)?;
        let body = self
            .transport
            .request(
                Method::POST,
                "/api/verify/document",
                Some(form),
                Some(vec![file]),
                None,
            )
            .await?;
        types::decode_enveloped(body, "verification")
    }

    /// Upload a selfie, optionally face-matched against a reference document.
    pub async fn verify_selfie(&self, request: VerifySelfieRequest) -> Result<VerificationRecord> {
        let mut form = Params::new();
        push_opt(&mut form, "verification_id", request.verification_id);
        push_opt(
            &mut form,
            "reference_document_id",
            request.reference_document_id,
        );
        push_opt(&mut form, "user_id", request.user_id);
        push_opt(&mut form, "webhook_url", request.webhook_url);
        push_metadata(&mut form, request.metadata);

        let file = PreparedFile::new("selfie", request.selfie)?;
        let body = self
            .transport
            .request(
                Method::POST,
                "/api/verify/selfie",
                Some(form),
                Some(vec![file]),
                None,
            )
            .await?;
        types::decode_enveloped(body, "verification")
    }

    /// Upload the back of an ID for enhanced verification with barcode
    /// scanning and front/back cross-validation.
    pub async fn verify_back_of_id(&self, request: VerifyBackOfIdRequest) -> Result<VerificationRecord> {
        let mut form: Params = vec![
            ("verification_id", request.verification_id),
            ("document_type", request.document_type.as_str().to_string()),
        ];
        push_metadata(&mut form, request.metadata);

        let file = PreparedFile::new("back_of_id", request.back_of_id)?;
        let body = self
            .transport
            .request(
                Method::POST,
                "/api/verify/back-of-id",
                Some(form),
                Some(vec![file]),
                None,
            )
            .await?;
        types::decode_enveloped(body, "verification")
    }

    /// Submit a live capture frame for liveness detection.
    pub async fn live_capture(&self, request: LiveCaptureRequest) -> Result<VerificationRecord> {
        let mut form: Params = vec![
            ("verification_id", request.verification_id),
            ("live_image_data", request.live_image_data),
        ];
        push_opt(&mut form, "challenge_response", request.challenge_response);
        push_metadata(&mut form, request.metadata);

        let body = self
            .transport
            .request(
                Method::POST,
                "/api/verify/live-capture",
                Some(form),
                None,
                None,
            )
            .await?;
        types::decode_enveloped(body, "verification")
    }

    /// Generate a secure token for a live-capture session.
    pub async fn generate_live_token(
        &self,
        verification_id: &str,
        challenge_type: Option<ChallengeType>,
    ) -> Result<LiveTokenResponse> {
        let mut form: Params = vec![("verification_id", verification_id.to_string())];
        push_opt(
            &mut form,
            "challenge_type",
            challenge_type.map(|c| c.as_str().to_string()),
        );

        let body = self
            .transport
            .request(
                Method::POST,
                "/api/verify/generate-live-token",
                Some(form),
                None,
                None,
            )
            .await?;
        types::decode(body)
    }

    /// Get the current status of a verification.
    pub async fn get_verification_status(&self, verification_id: &str) -> Result<VerificationRecord> {
        let body = self
            .transport
            .request(
                Method::GET,
                &format!("/api/verify/status/{verification_id}"),
                None,
                None,
                None,
            )
            .await?;
        types::decode_enveloped(body, "verification")
    }

    /// Get complete verification results including all analysis blocks.
    pub async fn get_verification_results(&self, verification_id: &str) -> Result<VerificationRecord> {
        let body = self
            .transport
            .request(
                Method::GET,
                &format!("/api/verify/results/{verification_id}"),
                None,
                None,
                None,
            )
            .await?;
        types::decode_enveloped(body, "verification")
    }

    /// Get verification history for a user.
    pub async fn get_verification_history(
        &self,
        user_id: &str,
        page: PageQuery,
    ) -> Result<VerificationList> {
        let params = page.into_params();
        let body = self
            .transport
            .request(
                Method::GET,
                &format!("/api/verify/history/{user_id}"),
                None,
                None,
                (!params.is_empty()).then_some(params),
            )
            .await?;
        types::decode(body)
    }

    /// List verification requests, optionally filtered.
    pub async fn list_verifications(&self, query: ListVerificationsQuery) -> Result<VerificationList> {
        let mut params = Params::new();
        push_opt(
            &mut params,
            "status",
            query.status.map(|s| s.as_str().to_string()),
        );
        push_opt(&mut params, "limit", query.limit.map(|v| v.to_string()));
        push_opt(&mut params, "offset", query.offset.map(|v| v.to_string()));
        push_opt(&mut params, "user_id", query.user_id);

        let body = self
            .transport
            .request(
                Method::GET,
                "/api/verify/list",
                None,
                None,
                (!params.is_empty()).then_some(params),
            )
            .await?;
        types::decode(body)
    }

    /// Update the webhook URL of an existing verification.
    pub async fn set_verification_webhook(
        &self,
        verification_id: &str,
        webhook_url: &str,
    ) -> Result<ApiMessage> {
        let form: Params = vec![("webhook_url", webhook_url.to_string())];
        let body = self
            .transport
            .request(
                Method::PATCH,
                &format!("/api/verify/{verification_id}/webhook"),
                Some(form),
                None,
                None,
            )
            .await?;
        types::decode(body)
    }

    // ── Developer ────────────────────────────────────────────────────

    /// Register as a new developer.
    pub async fn register_developer(&self, email: &str, name: &str) -> Result<DeveloperRegistration> {
        let form: Params = vec![("email", email.to_string()), ("name", name.to_string())];
        let body = self
            .transport
            .request(
                Method::POST,
                "/api/developer/register",
                Some(form),
                None,
                None,
            )
            .await?;
        types::decode(body)
    }

    /// Create a new API key.
    pub async fn create_api_key(&self, name: &str, environment: Environment) -> Result<CreatedApiKey> {
        let form: Params = vec![
            ("name", name.to_string()),
            ("environment", environment.as_str().to_string()),
        ];
        let body = self
            .transport
            .request(
                Method::POST,
                "/api/developer/api-key",
                Some(form),
                None,
                None,
            )
            .await?;
        types::decode(body)
    }

    /// List all API keys.
    pub async fn list_api_keys(&self) -> Result<Vec<types::ApiKeyInfo>> {
        #[derive(serde::Deserialize)]
        struct ApiKeyList {
            #[serde(default)]
            api_keys: Vec<types::ApiKeyInfo>,
        }

        let body = self
            .transport
            .request(Method::GET, "/api/developer/api-keys", None, None, None)
            .await?;
        let list: ApiKeyList = types::decode(body)?;
        Ok(list.api_keys)
    }

    /// Revoke an API key.
    pub async fn revoke_api_key(&self, key_id: &str) -> Result<ApiMessage> {
        let body = self
            .transport
            .request(
                Method::DELETE,
                &format!("/api/developer/api-key/{key_id}"),
                None,
                None,
                None,
            )
            .await?;
        types::decode(body)
    }

    /// Get API activity logs.
    pub async fn get_api_activity(&self, query: ActivityQuery) -> Result<ApiActivityPage> {
        let mut params = Params::new();
        push_opt(&mut params, "limit", query.limit.map(|v| v.to_string()));
        push_opt(&mut params, "offset", query.offset.map(|v| v.to_string()));
        push_opt(&mut params, "start_date", query.start_date);
        push_opt(&mut params, "end_date", query.end_date);

        let body = self
            .transport
            .request(
                Method::GET,
                "/api/developer/activity",
                None,
                None,
                (!params.is_empty()).then_some(params),
            )
            .await?;
        types::decode(body)
    }

    /// Get developer usage statistics.
    pub async fn get_usage_stats(&self) -> Result<UsageStats> {
        let body = self
            .transport
            .request(Method::GET, "/api/developer/stats", None, None, None)
            .await?;
        types::decode(body)
    }

    // ── Webhooks ─────────────────────────────────────────────────────

    /// Register a webhook endpoint.
    pub async fn register_webhook(&self, request: RegisterWebhookRequest) -> Result<Webhook> {
        let mut form: Params = vec![("url", request.url)];
        push_events(&mut form, request.events)?;
        push_opt(&mut form, "secret", request.secret);

        let body = self
            .transport
            .request(
                Method::POST,
                "/api/webhooks/register",
                Some(form),
                None,
                None,
            )
            .await?;
        types::decode_enveloped(body, "webhook")
    }

    /// List all registered webhooks.
    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>> {
        #[derive(serde::Deserialize)]
        struct WebhookList {
            #[serde(default)]
            webhooks: Vec<Webhook>,
        }

        let body = self
            .transport
            .request(Method::GET, "/api/webhooks", None, None, None)
            .await?;
        let list: WebhookList = types::decode(body)?;
        Ok(list.webhooks)
    }

    /// Update a webhook. Omitted fields are left unchanged on the server;
    /// an explicitly empty events list clears the subscription.
    pub async fn update_webhook(
        &self,
        webhook_id: &str,
        request: UpdateWebhookRequest,
    ) -> Result<Webhook> {
        let mut form = Params::new();
        push_opt(&mut form, "url", request.url);
        push_events(&mut form, request.events)?;
        push_opt(&mut form, "secret", request.secret);

        let body = self
            .transport
            .request(
                Method::PUT,
                &format!("/api/webhooks/{webhook_id}"),
                Some(form),
                None,
                None,
            )
            .await?;
        types::decode_enveloped(body, "webhook")
    }

    /// Delete a webhook.
    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<ApiMessage> {
        let body = self
            .transport
            .request(
                Method::DELETE,
                &format!("/api/webhooks/{webhook_id}"),
                None,
                None,
                None,
            )
            .await?;
        types::decode(body)
    }

    /// Trigger a test delivery to a webhook.
    pub async fn test_webhook(&self, webhook_id: &str) -> Result<WebhookTestResult> {
        let body = self
            .transport
            .request(
                Method::POST,
                &format!("/api/webhooks/{webhook_id}/test"),
                None,
                None,
                None,
            )
            .await?;
        types::decode(body)
    }

    /// Get delivery history for a webhook.
    pub async fn get_webhook_deliveries(
        &self,
        webhook_id: &str,
        page: PageQuery,
    ) -> Result<WebhookDeliveryPage> {
        let params = page.into_params();
        let body = self
            .transport
            .request(
                Method::GET,
                &format!("/api/webhooks/{webhook_id}/deliveries"),
                None,
                None,
                (!params.is_empty()).then_some(params),
            )
            .await?;
        types::decode(body)
    }

    // ── Health ───────────────────────────────────────────────────────

    /// Check API health.
    ///
    /// Older deployments do not expose the health endpoint, so a 404 is
    /// absorbed into a synthesized `ok` probe result rather than propagated.
    /// This is the one place the SDK swallows an error kind; every other
    /// classified error passes through unchanged.
    pub async fn health_check(&self) -> Result<HealthStatus> {
        match self
            .transport
            .request(Method::GET, "/api/health", None, None, None)
            .await
        {
            Ok(body) => types::decode(body),
            Err(IdswyftError::NotFound { .. }) => Ok(HealthStatus::degraded()),
            Err(err) => Err(err),
        }
    }

    /// Verify a webhook payload signature from the `X-Idswyft-Signature`
    /// header. See [`webhook::verify_signature`]; usable without a client.
    pub fn verify_webhook_signature(payload: &str, signature: &str, secret: &str) -> bool {
        webhook::verify_signature(payload, signature, secret)
    }
}

/// Append a form/query field only when a value is present, so omitted
/// optional parameters never appear as keys on the wire.
fn push_opt(params: &mut Params, name: &'static str, value: Option<String>) {
    if let Some(value) = value {
        params.push((name, value));
    }
}

/// Metadata travels as one JSON-encoded string field, never as nested
/// multipart fields.
fn push_metadata(form: &mut Params, metadata: Option<Map<String, Value>>) {
    if let Some(metadata) = metadata {
        form.push(("metadata", Value::Object(metadata).to_string()));
    }
}

/// Event lists are JSON-encoded like metadata. `Some(vec![])` serializes to
/// `[]` and is sent; `None` is omitted entirely. The server reads presence
/// as an update intent.
fn push_events(form: &mut Params, events: Option<Vec<String>>) -> Result<()> {
    if let Some(events) = events {
        form.push(("events", serde_json::to_string(&events)?));
    }
    Ok(())
}

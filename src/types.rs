//! Wire types: read-only projections of server state.
//!
//! Every response struct defaults its optional fields so sparse bodies from
//! older deployments still decode. Nothing here is mutated client-side.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::Result;

/// Server-side lifecycle state of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
    ManualReview,
}

impl VerificationStatus {
    /// Wire spelling of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
            Self::ManualReview => "manual_review",
        }
    }
}

/// Kind of identity check a verification performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    Document,
    Selfie,
    Combined,
    LiveCapture,
}

/// Government-issued document kinds accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    DriversLicense,
    NationalId,
    Other,
}

impl DocumentType {
    /// Wire spelling of the document type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::DriversLicense => "drivers_license",
            Self::NationalId => "national_id",
            Self::Other => "other",
        }
    }
}

/// Liveness challenge kinds for live-capture sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    Blink,
    Smile,
    TurnHead,
    Random,
}

impl ChallengeType {
    /// Wire spelling of the challenge type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blink => "blink",
            Self::Smile => "smile",
            Self::TurnHead => "turn_head",
            Self::Random => "random",
        }
    }
}

/// API key environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Wire spelling of the environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

/// One identity-check transaction tracked by the server.
///
/// Returned by every verification-producing call: either the record decodes
/// fully or the call errors, partial states are not representable.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationRecord {
    /// Server-assigned identifier.
    pub id: String,
    /// Current lifecycle status.
    pub status: VerificationStatus,
    /// Kind of check.
    #[serde(rename = "type")]
    pub verification_type: VerificationType,
    /// Overall confidence in \[0, 1\], when computed.
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Developer who owns this verification.
    #[serde(default)]
    pub developer_id: Option<String>,
    /// End user this verification belongs to.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Arbitrary caller-supplied metadata, echoed back by the server.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub manual_review_reason: Option<String>,
    /// OCR extraction results from document analysis.
    #[serde(default)]
    pub ocr_data: Option<OcrData>,
    /// Image quality analysis.
    #[serde(default)]
    pub quality_analysis: Option<QualityAnalysis>,
    /// Selfie-to-document face match score in \[0, 1\].
    #[serde(default)]
    pub face_match_score: Option<f64>,
    /// Liveness confidence in \[0, 1\].
    #[serde(default)]
    pub liveness_score: Option<f64>,
    /// Per-check liveness sub-scores, shape varies by server version.
    #[serde(default)]
    pub liveness_details: Option<Value>,
    /// Decoded barcode payload from an enhanced back-of-ID scan.
    #[serde(default)]
    pub barcode_data: Option<Value>,
    /// Front/back cross-validation results for two-sided ID checks.
    #[serde(default)]
    pub cross_validation: Option<Value>,
}

/// OCR fields extracted from a document, with per-field confidence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OcrData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub issuing_authority: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
    /// Confidence in \[0, 1\] keyed by extracted field name.
    #[serde(default)]
    pub confidence_scores: Option<HashMap<String, f64>>,
}

/// Document image quality metrics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityAnalysis {
    #[serde(default, rename = "isBlurry")]
    pub is_blurry: Option<bool>,
    #[serde(default, rename = "blurScore")]
    pub blur_score: Option<f64>,
    #[serde(default)]
    pub brightness: Option<f64>,
    #[serde(default)]
    pub contrast: Option<f64>,
    #[serde(default)]
    pub resolution: Option<ResolutionInfo>,
    #[serde(default, rename = "fileSize")]
    pub file_size: Option<FileSizeInfo>,
    #[serde(default, rename = "overallQuality")]
    pub overall_quality: Option<String>,
    /// Detected problems, e.g. glare or cropped edges.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Suggested fixes for a resubmission.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Image resolution from quality analysis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolutionInfo {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, rename = "isHighRes")]
    pub is_high_res: bool,
}

/// File size information from quality analysis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSizeInfo {
    #[serde(default)]
    pub bytes: u64,
    #[serde(default, rename = "isReasonableSize")]
    pub is_reasonable_size: bool,
}

/// Response from starting a verification session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartVerificationResponse {
    /// Session identifier to bind subsequent uploads to.
    pub verification_id: String,
    #[serde(default)]
    pub status: Option<VerificationStatus>,
    #[serde(default)]
    pub sandbox: Option<bool>,
    /// Suggested follow-up operations, when the server provides them.
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Token for a live-capture session.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveTokenResponse {
    /// Opaque capture token.
    pub token: String,
    #[serde(default)]
    pub verification_id: Option<String>,
    #[serde(default)]
    pub challenge_type: Option<ChallengeType>,
    /// Challenge instructions, shape varies by challenge type.
    #[serde(default)]
    pub challenge: Option<Value>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A page of verification records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationList {
    #[serde(default)]
    pub verifications: Vec<VerificationRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Developer usage statistics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub successful_requests: u64,
    #[serde(default)]
    pub failed_requests: u64,
    #[serde(default)]
    pub pending_requests: u64,
    #[serde(default)]
    pub manual_review_requests: u64,
    #[serde(default)]
    pub success_rate: String,
    #[serde(default)]
    pub monthly_limit: u64,
    #[serde(default)]
    pub monthly_usage: u64,
    #[serde(default)]
    pub remaining_quota: u64,
    #[serde(default)]
    pub quota_reset_date: String,
}

/// Metadata for an existing API key. The key material itself is only
/// returned at creation time, as [`CreatedApiKey`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Redacted preview, e.g. `sk_live_...a1b2`.
    #[serde(default)]
    pub key_preview: Option<String>,
    #[serde(default)]
    pub is_sandbox: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A freshly created API key, including the one-time key material.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedApiKey {
    /// Full key material; shown once, store it securely.
    pub api_key: String,
    #[serde(default)]
    pub key_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from developer registration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeveloperRegistration {
    pub developer_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// A registered webhook endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Webhook {
    pub id: String,
    pub url: String,
    /// Event names this webhook is subscribed to.
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Outcome of a test delivery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookTestResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub delivery_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One webhook delivery attempt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookDelivery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response_code: Option<u16>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
}

/// A page of webhook deliveries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookDeliveryPage {
    #[serde(default)]
    pub deliveries: Vec<WebhookDelivery>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// A page of API activity log entries. Entry shape varies by server version,
/// so entries stay opaque.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiActivityPage {
    #[serde(default)]
    pub activities: Vec<Value>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// API health probe result.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}

impl HealthStatus {
    /// Synthesized result for deployments without a health endpoint:
    /// reaching the server at all counts as a successful probe.
    pub(crate) fn degraded() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: String::new(),
        }
    }
}

/// Generic acknowledgement for delete/update style endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Resolve the wrapper-key ambiguity in one place.
///
/// Some server versions wrap a record under a key (`"verification"`,
/// `"webhook"`), others return it at the top level. When the key maps to a
/// nested object, unwrap it; otherwise use the body as-is.
pub(crate) fn unwrap_envelope(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if matches!(map.get(key), Some(Value::Object(_))) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode a raw body into a typed response.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Decode a possibly-enveloped body into a typed response.
pub(crate) fn decode_enveloped<T: DeserializeOwned>(value: Value, key: &str) -> Result<T> {
    decode(unwrap_envelope(value, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_nested_verification_envelope() {
        let body = json!({"verification": {"id": "verif_1", "status": "pending", "type": "document"}});
        let record: VerificationRecord = decode_enveloped(body, "verification").unwrap();
        assert_eq!(record.id, "verif_1");
        assert_eq!(record.status, VerificationStatus::Pending);
        assert_eq!(record.verification_type, VerificationType::Document);
    }

    #[test]
    fn falls_back_to_top_level_body() {
        let body = json!({"id": "verif_2", "status": "verified", "type": "selfie"});
        let record: VerificationRecord = decode_enveloped(body, "verification").unwrap();
        assert_eq!(record.id, "verif_2");
        assert_eq!(record.status, VerificationStatus::Verified);
    }

    #[test]
    fn non_object_wrapper_value_is_left_alone() {
        let body = json!({"verification": "verif_3", "id": "verif_3", "status": "failed", "type": "document"});
        let record: VerificationRecord = decode_enveloped(body, "verification").unwrap();
        assert_eq!(record.id, "verif_3");
    }

    #[test]
    fn sparse_record_decodes_with_defaults() {
        let body = json!({"id": "verif_1", "status": "manual_review", "type": "live_capture"});
        let record: VerificationRecord = decode(body).unwrap();
        assert_eq!(record.status, VerificationStatus::ManualReview);
        assert_eq!(record.verification_type, VerificationType::LiveCapture);
        assert!(record.confidence_score.is_none());
        assert!(record.ocr_data.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn full_record_decodes_analysis_blocks() {
        let body = json!({
            "id": "verif_9",
            "status": "verified",
            "type": "document",
            "confidence_score": 0.97,
            "created_at": "2026-01-15T12:00:00Z",
            "ocr_data": {
                "name": "Jane Doe",
                "document_number": "X1234567",
                "confidence_scores": {"name": 0.99, "document_number": 0.95}
            },
            "quality_analysis": {
                "isBlurry": false,
                "blurScore": 0.1,
                "brightness": 0.8,
                "resolution": {"width": 1920, "height": 1080, "isHighRes": true},
                "fileSize": {"bytes": 204800, "isReasonableSize": true},
                "overallQuality": "excellent",
                "issues": [],
                "recommendations": []
            },
            "face_match_score": 0.93,
            "liveness_score": 0.91,
            "barcode_data": {"pdf417": "raw"},
            "cross_validation": {"match": true}
        });
        let record: VerificationRecord = decode(body).unwrap();
        let ocr = record.ocr_data.unwrap();
        assert_eq!(ocr.name.as_deref(), Some("Jane Doe"));
        assert_eq!(ocr.confidence_scores.unwrap().len(), 2);
        let quality = record.quality_analysis.unwrap();
        assert_eq!(quality.is_blurry, Some(false));
        assert!(quality.resolution.unwrap().is_high_res);
        assert_eq!(quality.overall_quality.as_deref(), Some("excellent"));
        assert!(record.created_at.is_some());
        assert!(record.barcode_data.is_some());
    }

    #[test]
    fn wire_spellings_are_stable() {
        assert_eq!(DocumentType::DriversLicense.as_str(), "drivers_license");
        assert_eq!(VerificationStatus::ManualReview.as_str(), "manual_review");
        assert_eq!(ChallengeType::TurnHead.as_str(), "turn_head");
        assert_eq!(Environment::Production.as_str(), "production");
    }
}

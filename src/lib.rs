//! Rust client for the Idswyft identity verification API
//!
//! Packages authenticated requests (document upload, selfie match, liveness
//! capture, webhook management, usage stats) into typed async method calls
//! and maps HTTP status codes onto a closed error taxonomy.
//!
//! ## Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      IdswyftClient                           │
//! │  verify_document() | verify_selfie() | live_capture() | ...  │
//! └──────────────────────────┬───────────────────────────────────┘
//!                            │ one call = one round trip
//! ┌──────────────────────────▼───────────────────────────────────┐
//! │                        Transport                             │
//! │  identification headers · timeout · multipart/form encoding  │
//! │  2xx → decoded JSON      non-2xx → classified IdswyftError   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idswyft::{DocumentType, IdswyftClient, VerifyDocumentRequest};
//!
//! let client = IdswyftClient::new("your-api-key")?;
//!
//! let record = client
//!     .verify_document(
//!         VerifyDocumentRequest::new(DocumentType::Passport, "passport.jpg")
//!             .user_id("user-123"),
//!     )
//!     .await?;
//!
//! println!("{} is {:?}", record.id, record.status);
//! ```
//!
//! ## Webhooks
//!
//! Incoming webhook deliveries carry an `X-Idswyft-Signature: sha256=<hex>`
//! header. Validate it before trusting the payload:
//!
//! ```rust
//! use idswyft::webhook;
//!
//! let payload = r#"{"event_type":"verification.verified"}"#;
//! let signature = webhook::sign_payload(payload, "whsec_secret");
//! assert!(webhook::verify_signature(payload, &signature, "whsec_secret"));
//! ```
//!
//! The SDK performs no retries, no backoff, and no local caching; every
//! failure surfaces as exactly one [`IdswyftError`] variant.

pub mod client;
pub mod config;
pub mod error;
pub mod file;
pub mod types;
pub mod webhook;

mod transport;

pub use client::{
    ActivityQuery, IdswyftClient, ListVerificationsQuery, LiveCaptureRequest, PageQuery,
    RegisterWebhookRequest, UpdateWebhookRequest, VerifyBackOfIdRequest, VerifyDocumentRequest,
    VerifySelfieRequest,
};
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, IdswyftConfig, IdswyftConfigBuilder};
pub use error::{IdswyftError, Result};
pub use file::FileSource;
pub use transport::{API_KEY_HEADER, USER_AGENT};
pub use types::{
    ApiActivityPage, ApiKeyInfo, ApiMessage, ChallengeType, CreatedApiKey, DeveloperRegistration,
    DocumentType, Environment, FileSizeInfo, HealthStatus, LiveTokenResponse, OcrData,
    QualityAnalysis, ResolutionInfo, StartVerificationResponse, UsageStats, VerificationList,
    VerificationRecord, VerificationStatus, VerificationType, Webhook, WebhookDelivery,
    WebhookDeliveryPage, WebhookTestResult,
};
pub use webhook::{SIGNATURE_HEADER, SIGNATURE_PREFIX};

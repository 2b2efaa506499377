//! Contract tests for the verification surface: uploads, liveness, status
//! and listing, driven against a wiremock server.

use std::time::Duration;

use idswyft::{
    DocumentType, IdswyftClient, IdswyftConfig, IdswyftError, ListVerificationsQuery,
    LiveCaptureRequest, PageQuery, VerificationStatus, VerificationType, VerifyBackOfIdRequest,
    VerifyDocumentRequest, VerifySelfieRequest,
};
use serde_json::json;
use wiremock::matchers::{
    any, body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> IdswyftClient {
    let config = IdswyftConfig::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build();
    IdswyftClient::with_config(config).unwrap()
}

// ── POST /api/verify/document ────────────────────────────────────────

#[tokio::test]
async fn verify_document_unwraps_enveloped_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/document"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verification": {"id": "verif_1", "status": "pending", "type": "document"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .verify_document(VerifyDocumentRequest::new(
            DocumentType::Passport,
            b"fake image bytes".as_slice(),
        ))
        .await
        .unwrap();

    assert_eq!(record.id, "verif_1");
    assert_eq!(record.status, VerificationStatus::Pending);
    assert_eq!(record.verification_type, VerificationType::Document);
}

#[tokio::test]
async fn verify_document_accepts_top_level_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/document"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "verif_2", "status": "verified", "type": "document",
            "confidence_score": 0.98
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .verify_document(VerifyDocumentRequest::new(
            DocumentType::DriversLicense,
            b"front".as_slice(),
        ))
        .await
        .unwrap();

    assert_eq!(record.id, "verif_2");
    assert_eq!(record.confidence_score, Some(0.98));
}

#[tokio::test]
async fn verify_document_sends_multipart_with_conventional_field_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/document"))
        .and(body_string_contains("name=\"document\""))
        .and(body_string_contains("application/octet-stream"))
        .and(body_string_contains("passport"))
        .and(body_string_contains("verif_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verification": {"id": "verif_123", "status": "pending", "type": "document"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .verify_document(
            VerifyDocumentRequest::new(DocumentType::Passport, b"image".as_slice())
                .verification_id("verif_123")
                .user_id("user-1"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn identification_headers_ride_on_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/document"))
        .and(header("X-API-Key", "test-key"))
        .and(header("User-Agent", idswyft::USER_AGENT))
        .and(header("X-SDK-Version", env!("CARGO_PKG_VERSION")))
        .and(header("X-SDK-Language", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verification": {"id": "verif_1", "status": "pending", "type": "document"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .verify_document(VerifyDocumentRequest::new(
            DocumentType::Passport,
            b"image".as_slice(),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn verify_document_surfaces_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/document"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "document_type is invalid",
            "field": "document_type"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .verify_document(VerifyDocumentRequest::new(
            DocumentType::Other,
            b"image".as_slice(),
        ))
        .await
        .unwrap_err();

    match err {
        IdswyftError::Validation { field, .. } => {
            assert_eq!(field.as_deref(), Some("document_type"));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn unreadable_file_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = test_client(&server);
    let err = client
        .verify_document(VerifyDocumentRequest::new(
            DocumentType::Passport,
            "/no/such/file.jpg",
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, IdswyftError::InvalidFile(_)));
}

// ── POST /api/verify/selfie ──────────────────────────────────────────

#[tokio::test]
async fn verify_selfie_sends_reference_document_and_unwraps() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/selfie"))
        .and(body_string_contains("name=\"selfie\""))
        .and(body_string_contains("doc_9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "verif_3", "status": "verified", "type": "selfie",
            "face_match_score": 0.93, "liveness_score": 0.91
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .verify_selfie(
            VerifySelfieRequest::new(b"selfie bytes".as_slice()).reference_document_id("doc_9"),
        )
        .await
        .unwrap();

    assert_eq!(record.face_match_score, Some(0.93));
    assert_eq!(record.liveness_score, Some(0.91));
}

// ── POST /api/verify/back-of-id ──────────────────────────────────────

#[tokio::test]
async fn verify_back_of_id_returns_enhanced_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/back-of-id"))
        .and(body_string_contains("name=\"back_of_id\""))
        .and(body_string_contains("verif_5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "verif_5", "status": "verified", "type": "document",
            "barcode_data": {"pdf417": "raw-data"},
            "cross_validation": {"match": true, "score": 0.99}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .verify_back_of_id(VerifyBackOfIdRequest::new(
            "verif_5",
            DocumentType::DriversLicense,
            b"barcode side".as_slice(),
        ))
        .await
        .unwrap();

    assert!(record.barcode_data.is_some());
    assert_eq!(record.cross_validation.unwrap()["score"], 0.99);
}

// ── POST /api/verify/start ───────────────────────────────────────────

#[tokio::test]
async fn start_verification_omits_sandbox_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/start"))
        .and(wiremock::matchers::body_string("user_id=user-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "verification_id": "verif_7",
            "next_steps": ["document_upload"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let session = client.start_verification("user-1", None).await.unwrap();
    assert_eq!(session.verification_id, "verif_7");
    assert_eq!(session.next_steps, vec!["document_upload"]);
}

#[tokio::test]
async fn client_level_sandbox_flag_is_sent_when_not_overridden() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/start"))
        .and(wiremock::matchers::body_string("user_id=user-1&sandbox=true"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "verification_id": "verif_8"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = IdswyftConfig::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .sandbox(true)
        .build();
    let client = IdswyftClient::with_config(config).unwrap();
    client.start_verification("user-1", None).await.unwrap();
}

#[tokio::test]
async fn per_call_sandbox_overrides_client_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/start"))
        .and(wiremock::matchers::body_string("user_id=user-1&sandbox=false"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "verification_id": "verif_9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = IdswyftConfig::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .sandbox(true)
        .build();
    let client = IdswyftClient::with_config(config).unwrap();
    client
        .start_verification("user-1", Some(false))
        .await
        .unwrap();
}

// ── Liveness ─────────────────────────────────────────────────────────

#[tokio::test]
async fn live_capture_submits_frame_and_challenge() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/live-capture"))
        .and(body_string_contains("live_image_data="))
        .and(body_string_contains("challenge_response=blink"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "verif_10", "status": "verified", "type": "live_capture",
            "liveness_score": 0.95
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .live_capture(
            LiveCaptureRequest::new("verif_10", "aGVsbG8=").challenge_response("blink"),
        )
        .await
        .unwrap();

    assert_eq!(record.verification_type, VerificationType::LiveCapture);
    assert_eq!(record.liveness_score, Some(0.95));
}

#[tokio::test]
async fn generate_live_token_sends_challenge_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify/generate-live-token"))
        .and(body_string_contains("challenge_type=turn_head"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "lct_abc", "challenge_type": "turn_head",
            "expires_at": "2026-01-15T12:05:00Z"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let token = client
        .generate_live_token("verif_10", Some(idswyft::ChallengeType::TurnHead))
        .await
        .unwrap();

    assert_eq!(token.token, "lct_abc");
    assert!(token.expires_at.is_some());
}

// ── Status, results, listing ─────────────────────────────────────────

#[tokio::test]
async fn get_verification_status_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify/status/verif_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verification": {"id": "verif_1", "status": "manual_review", "type": "combined",
                             "manual_review_reason": "low confidence"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client.get_verification_status("verif_1").await.unwrap();
    assert_eq!(record.status, VerificationStatus::ManualReview);
    assert_eq!(record.manual_review_reason.as_deref(), Some("low confidence"));
}

#[tokio::test]
async fn get_verification_results_decodes_analysis_blocks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify/results/verif_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "verif_1", "status": "verified", "type": "document",
            "ocr_data": {"name": "Jane Doe", "document_number": "X1"},
            "quality_analysis": {"isBlurry": false, "overallQuality": "good",
                                  "issues": ["minor glare"]}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client.get_verification_results("verif_1").await.unwrap();
    assert_eq!(record.ocr_data.unwrap().name.as_deref(), Some("Jane Doe"));
    let quality = record.quality_analysis.unwrap();
    assert_eq!(quality.issues, vec!["minor glare"]);
}

#[tokio::test]
async fn list_verifications_sends_only_present_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify/list"))
        .and(query_param("status", "pending"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("user_id"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verifications": [
                {"id": "verif_1", "status": "pending", "type": "document"}
            ],
            "total": 1, "limit": 10, "offset": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .list_verifications(
            ListVerificationsQuery::default()
                .status(VerificationStatus::Pending)
                .limit(10),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.verifications[0].id, "verif_1");
}

#[tokio::test]
async fn get_verification_history_paginates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify/history/user-1"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verifications": [], "total": 12, "limit": 5, "offset": 5
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .get_verification_history("user-1", PageQuery::default().limit(5).offset(5))
        .await
        .unwrap();
    assert_eq!(page.total, 12);
    assert!(page.verifications.is_empty());
}

#[tokio::test]
async fn set_verification_webhook_patches_url() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/verify/verif_1/webhook"))
        .and(body_string_contains("webhook_url="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ack = client
        .set_verification_webhook("verif_1", "https://example.com/hook")
        .await
        .unwrap();
    assert_eq!(ack.success, Some(true));
}

// ── Error propagation ────────────────────────────────────────────────

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify/status/verif_1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "message": "Rate limit exceeded", "retry_after": 60
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get_verification_status("verif_1").await.unwrap_err();
    match err {
        IdswyftError::RateLimit {
            message,
            retry_after,
        } => {
            assert_eq!(message, "Rate limit exceeded");
            assert_eq!(retry_after, Some(60));
        }
        other => panic!("expected RateLimit, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_still_classifies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify/status/verif_1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get_verification_status("verif_1").await.unwrap_err();
    assert!(matches!(err, IdswyftError::Server(m) if m == "upstream unavailable"));
}

#[tokio::test]
async fn timeout_surfaces_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/verify/status/verif_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "verif_1", "status": "pending", "type": "document"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = IdswyftConfig::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .timeout(Duration::from_millis(200))
        .build();
    let client = IdswyftClient::with_config(config).unwrap();

    let err = client.get_verification_status("verif_1").await.unwrap_err();
    assert!(matches!(err, IdswyftError::Network(m) if m.contains("timed out")));
}

// ── Construction guard ───────────────────────────────────────────────

#[tokio::test]
async fn empty_api_key_never_touches_the_network() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = IdswyftConfig::builder()
        .api_key("")
        .base_url(server.uri())
        .build();
    let err = IdswyftClient::with_config(config).unwrap_err();
    assert!(matches!(err, IdswyftError::Config(_)));

    // MockServer verifies the zero-request expectation on drop.
}

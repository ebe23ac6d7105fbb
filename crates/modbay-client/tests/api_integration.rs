//! Integration tests for the client against a mock API server.
//!
//! Covers the envelope contract (success/failure exclusivity, protocol
//! errors on malformed bodies), the auth header schemes, pre-flight input
//! validation, and the per-resource endpoints.

use std::net::TcpListener;
use std::time::Duration;

use modbay_client::{
    ConversationContent, Error, LicenseContent, MessageContent, ModbayClient, TokenKind,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client wired to a mock server, signing with a private test token.
fn test_client(server: &MockServer) -> ModbayClient {
    ModbayClient::builder()
        .base_url(server.uri())
        .token(TokenKind::Private, "test-secret")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth and health
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn private_token_uses_private_scheme() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .and(header("Authorization", "Private test-secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": "ok"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.health().check().await.expect("health call");

    assert!(envelope.is_success());
    assert!(envelope.data().expect("payload").is_ok());
}

#[tokio::test]
async fn public_token_uses_public_scheme() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .and(header("Authorization", "Public test-secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": "ok"})),
        )
        .mount(&server)
        .await;

    let client = ModbayClient::builder()
        .base_url(server.uri())
        .token(TokenKind::Public, "test-secret")
        .build()
        .expect("client should build");

    assert!(client.health().is_healthy().await);
}

#[tokio::test]
async fn unhealthy_status_fails_the_liveness_probe() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": "degraded"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(!client.health().is_healthy().await);
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversations
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_unread_conversations() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "data": [
                {"conversation_id": 11, "title": "Install help", "reply_count": 3},
                {"conversation_id": 12, "title": "Refund", "reply_count": 0},
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.conversations().unread().await.expect("list call");

    let conversations = envelope.data().expect("payload");
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].conversation_id, 11);
    assert_eq!(conversations[0].title, "Install help");
    assert_eq!(conversations[0].reply_count, 3);
    assert_eq!(conversations[1].conversation_id, 12);
}

#[tokio::test]
async fn empty_conversation_list_is_a_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.conversations().unread().await.expect("list call");

    assert!(envelope.is_success());
    assert!(envelope.data().expect("payload").is_empty());
}

#[tokio::test]
async fn starts_a_conversation_and_returns_its_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/conversations"))
        .and(body_json(serde_json::json!({
            "recipient_ids": [4, 9],
            "title": "Modding question",
            "message": "Hey there",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": 91})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let content = ConversationContent::new([4u64, 9], "Modding question", "Hey there");
    let envelope = client.conversations().start(&content).await.expect("start call");

    assert_eq!(envelope.into_result().expect("id"), 91);
}

#[tokio::test]
async fn rejects_empty_recipient_list_before_sending() {
    let server = MockServer::start().await;

    let client = test_client(&server);
    let content = ConversationContent::new(Vec::new(), "No one home", "Hello?");
    let err = client
        .conversations()
        .start(&content)
        .await
        .expect_err("should fail locally");

    assert!(err.is_invalid_request());

    let requests = server.received_requests().await.expect("request recording");
    assert!(requests.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn null_reply_data_parses_as_an_empty_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations/7/replies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": null})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.messages().unread_replies(7).await.expect("replies call");

    assert!(envelope.is_success());
    assert!(envelope.data().expect("payload").is_empty());
}

#[tokio::test]
async fn lists_unread_replies_newest_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations/7/replies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "data": [
                {"message_id": 33, "author_id": 5, "message": "newest"},
                {"message_id": 31, "author_id": 6, "message": "older"},
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.messages().unread_replies(7).await.expect("replies call");

    let replies = envelope.data().expect("payload");
    assert_eq!(replies[0].message_id, 33);
    assert_eq!(replies[1].message_id, 31);
    assert_eq!(replies[1].author_id, 6);
    assert_eq!(replies[1].message, "older");
}

#[tokio::test]
async fn reply_acknowledgement_carries_no_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/conversations/7/replies"))
        .and(body_json(serde_json::json!({"message": "On my way"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "success"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client
        .messages()
        .reply(7, &MessageContent::new("On my way"))
        .await
        .expect("reply call");

    assert!(envelope.is_success());
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure envelopes and protocol errors
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn failure_envelope_preserves_the_error_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "result": "failure",
            "error": {"code": 403, "message": "forbidden"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.conversations().unread().await.expect("call resolves");

    assert!(envelope.is_failure());
    assert!(envelope.data().is_none());
    let detail = envelope.error().expect("error detail");
    assert_eq!(detail.code.as_i64(), Some(403));
    assert_eq!(detail.message, "forbidden");
}

#[tokio::test]
async fn unparseable_body_is_a_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .conversations()
        .unread()
        .await
        .expect_err("should fail");

    assert!(err.is_protocol());
    match err {
        Error::Protocol { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn success_without_data_is_a_protocol_error() {
    let server = MockServer::start().await;

    // Health expects a payload; an empty success body breaks the contract.
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "success"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.health().check().await.expect_err("should fail");

    assert!(err.is_protocol());
}

#[tokio::test]
async fn failure_with_data_is_a_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "failure",
            "data": [],
            "error": {"code": 1, "message": "confused"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .conversations()
        .unread()
        .await
        .expect_err("should fail");

    assert!(err.is_protocol());
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener); // release the port so that requests fail with ECONNREFUSED

    let client = ModbayClient::builder()
        .base_url(format!("http://{}", addr))
        .token(TokenKind::Private, "test-secret")
        .build()
        .expect("client should build");

    let err = client.health().check().await.expect_err("should fail");
    assert!(err.is_connect());
}

#[tokio::test]
async fn slow_response_times_out_as_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": "ok"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = ModbayClient::builder()
        .base_url(server.uri())
        .token(TokenKind::Private, "test-secret")
        .timeout(Duration::from_millis(50))
        .build()
        .expect("client should build");

    let err = client.health().check().await.expect_err("should time out");
    assert!(err.is_timeout());
}

// ─────────────────────────────────────────────────────────────────────────────
// Concurrency
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_reads_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "data": [{"conversation_id": 1, "title": "A", "reply_count": 1}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/conversations/1/replies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "data": [{"message_id": 2, "author_id": 3, "message": "hi"}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let conversations_api = client.conversations();
    let messages_api = client.messages();
    let (conversations, replies) = tokio::join!(
        conversations_api.unread(),
        messages_api.unread_replies(1),
    );

    let conversations = conversations.expect("conversations call");
    let replies = replies.expect("replies call");
    assert_eq!(conversations.data().expect("payload").len(), 1);
    assert_eq!(replies.data().expect("payload").len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Licenses
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetches_the_member_license() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resources/55/licenses/member"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "data": {"permanent": true}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.licenses().member(55).await.expect("member call");

    let license = envelope.data().expect("payload");
    assert!(license.permanent);
    assert_eq!(license.purchaser_id, None);
    assert_eq!(license.active, None);
    assert_eq!(license.start_date, None);
    assert_eq!(license.end_date, None);
}

#[tokio::test]
async fn issued_license_omits_absent_fields_on_the_wire() {
    let server = MockServer::start().await;

    // The body matcher is exact: extra nulls would fail the match.
    Mock::given(method("POST"))
        .and(path("/v1/resources/55/licenses"))
        .and(body_json(serde_json::json!({"permanent": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": 7700})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client
        .licenses()
        .issue(55, &LicenseContent::permanent())
        .await
        .expect("issue call");

    assert_eq!(envelope.into_result().expect("license id"), 7700);
}

#[tokio::test]
async fn modifies_a_license_in_place() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/resources/55/licenses/9"))
        .and(body_json(serde_json::json!({
            "permanent": false,
            "active": false,
            "start_date": 1_700_000_000u64,
            "end_date": 1_731_536_000u64,
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "success"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let license = LicenseContent::temporary(1_700_000_000, 1_731_536_000).with_active(false);
    let envelope = client
        .licenses()
        .modify(55, 9, &license)
        .await
        .expect("modify call");

    assert!(envelope.is_success());
}

// ─────────────────────────────────────────────────────────────────────────────
// Updates
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn pages_through_the_update_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resources/55/updates"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "data": [
                {"update_id": 610, "title": "v2.1", "message": "Bug fixes", "update_date": 1_715_000_000u32}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.updates().page(55, 2).await.expect("page call");

    let updates = envelope.data().expect("payload");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].update_id, 610);
    assert_eq!(updates[0].title, "v2.1");
    assert_eq!(updates[0].update_date, 1_715_000_000);
}

#[tokio::test]
async fn update_feed_defaults_to_no_paging_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resources/55/updates"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": "success", "data": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let envelope = client.updates().list(55).await.expect("list call");
    assert!(envelope.is_success());

    let requests = server.received_requests().await.expect("request recording");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

use std::time::Duration;

use mark0::{ChatPrompt, ChatProvider, Provider, ProviderError, prompts};
use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const CHAT_PATH: &str = "/v1/chat/completions";

fn provider(server: &MockServer) -> ChatProvider {
    ChatProvider::builder()
        .name("mock")
        .endpoint(format!("{}{CHAT_PATH}", server.uri()))
        .model("mock-model")
        .api_key("test-key".to_string())
        .timeout(Duration::from_secs(5))
        .build()
}

fn prompt() -> ChatPrompt {
    ChatPrompt::builder()
        .system("You grade answers.")
        .user("Question: Define gravity")
        .build()
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
}

#[tokio::test]
async fn returns_first_choice_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "mock-model", "max_tokens": 500 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Score: 4\nFeedback: Good.")))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider(&server)
        .complete(&prompt())
        .await
        .expect("completion");
    assert_eq!(text, "Score: 4\nFeedback: Good.");
}

#[tokio::test]
async fn sends_system_then_user_with_sampling_limits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    provider(&server)
        .complete(&prompts::generation_prompt("Why is the sky blue?"))
        .await
        .expect("completion");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");

    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(
        body["messages"][1]["content"]
            .as_str()
            .is_some_and(|c| c.contains("Why is the sky blue?"))
    );
    assert_eq!(body["max_tokens"], 1000);
    let temperature = body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server).complete(&prompt()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Status(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn missing_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = provider(&server).complete(&prompt()).await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedBody));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).complete(&prompt()).await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedBody));
}

#[tokio::test]
async fn missing_credential_sends_nothing() {
    let server = MockServer::start().await;
    let unset_var = format!("MARK0_TEST_KEY_{}", Uuid::new_v4().simple());
    let provider = ChatProvider::builder()
        .name("keyless")
        .endpoint(format!("{}{CHAT_PATH}", server.uri()))
        .model("mock-model")
        .api_key_env(unset_var.clone())
        .build();

    let err = provider.complete(&prompt()).await.unwrap_err();

    assert!(matches!(err, ProviderError::MissingCredential(ref var) if *var == unset_var));
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn blank_explicit_key_counts_as_missing() {
    let server = MockServer::start().await;
    let provider = ChatProvider::builder()
        .name("blank")
        .endpoint(format!("{}{CHAT_PATH}", server.uri()))
        .model("mock-model")
        .api_key("   ".to_string())
        .api_key_env(format!("MARK0_TEST_KEY_{}", Uuid::new_v4().simple()))
        .build();

    let err = provider.complete(&prompt()).await.unwrap_err();
    assert!(matches!(err, ProviderError::MissingCredential(_)));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let provider = ChatProvider::builder()
        .name("slow")
        .endpoint(format!("{}{CHAT_PATH}", server.uri()))
        .model("mock-model")
        .api_key("test-key".to_string())
        .timeout(Duration::from_millis(200))
        .build();

    let err = provider.complete(&prompt()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Timeout));
}

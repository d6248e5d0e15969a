use chrono::NaiveDate;
use doc_titler::engine::{GenerationError, OpenAiTitleGenerator, TitleGenerator};
use doc_titler::network::ApiClient;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator(server: &MockServer, model: &str) -> OpenAiTitleGenerator {
    let api = ApiClient::new(Duration::from_secs(10)).unwrap();
    OpenAiTitleGenerator::new(api, "sk-test", &server.uri(), model, "SYSTEM PROMPT").unwrap()
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1234567890,
        "model": "gpt-4-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_generate_sends_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(r#"{"title": "t"}"#)))
        .expect(1)
        .mount(&server)
        .await;

    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let answer = generator(&server, "gpt-4-turbo")
        .generate_for_date("Invoice\n\nTotal: $500\n2023 Tax Form", date)
        .await
        .unwrap();
    assert_eq!(answer, r#"{"title": "t"}"#);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["model"], "gpt-4-turbo");
    assert_eq!(body["response_format"], json!({"type": "json_object"}));
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "SYSTEM PROMPT"},
            {"role": "user", "content": "01/15/2024Invoice Total: $500 2023 Tax Form"}
        ])
    );
}

#[tokio::test]
async fn test_generate_truncates_for_small_models() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .mount(&server)
        .await;

    let content = "word ".repeat(20_000);
    generator(&server, "mistral")
        .generate_title(&content)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();

    // * 10-character date stamp + 45 000 character budget
    assert!(user.chars().count() <= 10 + 45_000);
    assert!(!user.contains("  "));
}

#[tokio::test]
async fn test_generate_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "quota"}})),
        )
        .mount(&server)
        .await;

    let result = generator(&server, "gpt-4").generate_title("text").await;
    assert!(matches!(result, Err(GenerationError::Network(_))));
}

#[tokio::test]
async fn test_generate_without_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let result = generator(&server, "gpt-4").generate_title("text").await;
    assert!(matches!(result, Err(GenerationError::MissingContent)));
}

#[tokio::test]
async fn test_generate_with_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("upstream proxy error"))
        .mount(&server)
        .await;

    let result = generator(&server, "gpt-4").generate_title("text").await;
    assert!(matches!(result, Err(GenerationError::UnexpectedBody)));
}

use super::*;

fn submission() -> Submission {
    Submission {
        word: "ぴらる".to_string(),
        text: "とても短い".to_string(),
    }
}

#[test]
fn test_endpoint_joins_base_url() {
    let mut config = LlmConfig::default();
    assert_eq!(config.endpoint(), "https://api.openai.com/v1/chat/completions");
    config.base_url = "http://localhost:11434/v1/".to_string();
    assert_eq!(config.endpoint(), "http://localhost:11434/v1/chat/completions");
}

#[test]
fn test_request_body_shape() {
    let gateway = OpenAiGateway::new(LlmConfig::default(), "test-key").unwrap();
    let body = serde_json::to_value(gateway.request_body(&submission())).unwrap();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["temperature"], 1.5);
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(
        body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("【造語】ぴらる")
    );
}

#[test]
fn test_extract_content() {
    let envelope = r#"{"choices":[{"message":{"role":"assistant","content":"{\"nat\":20}"}}]}"#;
    assert_eq!(extract_content(envelope).unwrap(), r#"{"nat":20}"#);
}

#[test]
fn test_extract_content_defaults_to_empty_object() {
    assert_eq!(extract_content(r#"{"choices":[]}"#).unwrap(), "{}");
    assert_eq!(
        extract_content(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap(),
        "{}"
    );
}

#[test]
fn test_extract_content_rejects_bad_envelope() {
    assert!(matches!(
        extract_content("<html>bad gateway</html>"),
        Err(GatewayError::Envelope(_))
    ));
}

#[test]
fn test_missing_api_key() {
    let config = LlmConfig {
        api_key_env: "COINAGE_JUDGE_TEST_UNSET_KEY".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        OpenAiGateway::from_env(config),
        Err(GatewayError::MissingApiKey { .. })
    ));
}

/// Chat-completions stand-in that answers every POST with `status` and `body`.
async fn stub_upstream(status: u16, body: &'static str) -> String {
    use axum::http::StatusCode;
    use axum::routing::post;

    let app = axum::Router::new().route(
        "/v1/chat/completions",
        post(move |headers: axum::http::HeaderMap| async move {
            let authorized = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                == Some("Bearer test-key");
            if !authorized {
                return (StatusCode::UNAUTHORIZED, "no key".to_string());
            }
            (
                StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
                body.to_string(),
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn gateway_for(base_url: String) -> OpenAiGateway {
    let config = LlmConfig {
        base_url,
        ..Default::default()
    };
    OpenAiGateway::new(config, "test-key").unwrap()
}

#[tokio::test]
async fn test_complete_returns_message_content() {
    let base = stub_upstream(
        200,
        r#"{"choices":[{"message":{"role":"assistant","content":"{\"nat\":31,\"cre\":12}"}}]}"#,
    )
    .await;
    let gateway = gateway_for(base);
    assert_eq!(gateway.config().model, "gpt-4o-mini");
    let content = gateway.complete(&submission()).await.unwrap();
    assert_eq!(content, r#"{"nat":31,"cre":12}"#);
}

#[tokio::test]
async fn test_complete_surfaces_non_success_status() {
    let base = stub_upstream(429, "rate limited").await;
    let err = gateway_for(base).complete(&submission()).await.unwrap_err();
    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

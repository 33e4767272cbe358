/*!
 * Tests for provider implementations
 *
 * None of these tests touch the network.
 */

use anyhow::Result;

use jasweep::app_config::{Config, TranslationProvider};
use jasweep::providers::anthropic::{Anthropic, AnthropicRequest, AnthropicResponse};
use jasweep::providers::mock::MockProvider;
use jasweep::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use jasweep::providers::{CompletionRequest, Provider, create_provider};

fn request(text: &str) -> CompletionRequest {
    CompletionRequest {
        system_prompt: "Translate Japanese to English".to_string(),
        text: text.to_string(),
        temperature: 0.0,
        max_tokens: 128,
    }
}

#[test]
fn test_create_provider_shouldFollowActiveProvider() -> Result<()> {
    let mut config = Config::default();
    for (provider, name) in [
        (TranslationProvider::OpenAI, "openai"),
        (TranslationProvider::LMStudio, "openai"),
        (TranslationProvider::Anthropic, "anthropic"),
        (TranslationProvider::Ollama, "ollama"),
    ] {
        config.translation.provider = provider;
        let client = create_provider(&config.translation)?;
        assert_eq!(client.name(), name);
    }
    Ok(())
}

#[test]
fn test_openai_request_shouldSerializeChatMessages() -> Result<()> {
    let request = OpenAIRequest::new("gpt-4o-mini")
        .add_message("system", "Translate")
        .add_message("user", "こんにちは")
        .temperature(0.0)
        .max_tokens(64);

    let json = serde_json::to_value(&request)?;
    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(json["messages"][1]["role"], "user");
    assert_eq!(json["messages"][1]["content"], "こんにちは");
    assert_eq!(json["max_tokens"], 64);
    Ok(())
}

#[test]
fn test_openai_extract_text_shouldReadFirstChoice() -> Result<()> {
    let response: OpenAIResponse = serde_json::from_str(
        r#"{
            "choices": [{ "message": { "role": "assistant", "content": "Hello" } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 1 }
        }"#,
    )?;
    assert_eq!(OpenAI::extract_text(&response).as_deref(), Some("Hello"));

    let empty: OpenAIResponse = serde_json::from_str(r#"{ "choices": [] }"#)?;
    assert_eq!(OpenAI::extract_text(&empty), None);
    Ok(())
}

#[test]
fn test_anthropic_request_shouldCarrySystemPromptSeparately() -> Result<()> {
    let request = AnthropicRequest::new("claude-3-5-haiku-latest", 256)
        .system("Translate")
        .add_message("user", "エラー");

    let json = serde_json::to_value(&request)?;
    assert_eq!(json["system"], "Translate");
    assert_eq!(json["messages"][0]["content"], "エラー");
    assert_eq!(json["max_tokens"], 256);
    assert!(json.get("temperature").is_none());
    Ok(())
}

#[test]
fn test_anthropic_extract_text_shouldJoinTextBlocks() -> Result<()> {
    let response: AnthropicResponse = serde_json::from_str(
        r#"{
            "content": [
                { "type": "text", "text": "Error" },
                { "type": "tool_use" },
                { "type": "text", "text": " occurred" }
            ],
            "usage": { "input_tokens": 10, "output_tokens": 3 }
        }"#,
    )?;
    assert_eq!(Anthropic::extract_text(&response), "Error occurred");
    Ok(())
}

#[tokio::test]
async fn test_mock_provider_withSlowBehavior_shouldStillAnswer() {
    let provider = MockProvider::slow(5).with_translation("完了", "Done");
    assert_eq!(provider.complete(&request("完了")).await.unwrap(), "Done");
    assert!(provider.test_connection().await.is_ok());
}

#[tokio::test]
async fn test_mock_provider_failing_shouldFailConnectionTest() {
    let provider = MockProvider::failing();
    assert!(provider.test_connection().await.is_err());
    assert!(provider.complete(&request("失敗")).await.is_err());
}

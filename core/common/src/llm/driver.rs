//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → 送信 → テキスト抽出）を提供し、
//! CompletionService ポートを実装します。

use crate::error::CompletionError;
use crate::llm::config::SamplingParams;
use crate::msg::Message;
use crate::ports::outbound::{CompletionService, LlmProvider};

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: LlmProvider + Send + Sync> CompletionService for LlmDriver<P> {
    fn complete(&self, context: &[Message], params: &SamplingParams) -> Result<String, CompletionError> {
        let payload = self.provider.make_request_payload(context, params)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| CompletionError::Other(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json, params.timeout)?;

        // content が無い・null のときだけ失敗。空文字は正常な応答として返す
        self.provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| CompletionError::Other("No text in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;

    // モックプロバイダ
    struct MockProvider {
        response: Result<String, CompletionError>,
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn make_request_payload(
            &self,
            context: &[Message],
            _params: &SamplingParams,
        ) -> Result<Value, CompletionError> {
            Ok(json!({ "n": context.len() }))
        }

        fn make_http_request(&self, _request_json: &str, _timeout: Duration) -> Result<String, CompletionError> {
            self.response.clone()
        }

        fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, CompletionError> {
            let v: Value = serde_json::from_str(response_json)
                .map_err(|e| CompletionError::Other(e.to_string()))?;
            Ok(v["text"].as_str().map(|s| s.to_string()))
        }
    }

    fn driver(response: Result<String, CompletionError>) -> LlmDriver<MockProvider> {
        LlmDriver::new(MockProvider { response })
    }

    #[test]
    fn test_driver_complete_returns_text() {
        let d = driver(Ok(r#"{"text":"Hello, world!"}"#.to_string()));
        let reply = d
            .complete(&[Message::system("s"), Message::user("hi")], &SamplingParams::default())
            .unwrap();
        assert_eq!(reply, "Hello, world!");
        assert_eq!(d.provider().name(), "mock");
    }

    #[test]
    fn test_driver_complete_accepts_empty_text() {
        let d = driver(Ok(r#"{"text":""}"#.to_string()));
        let reply = d.complete(&[], &SamplingParams::default()).unwrap();
        assert_eq!(reply, "");
    }

    #[test]
    fn test_driver_complete_missing_text_is_other() {
        let d = driver(Ok("{}".to_string()));
        let err = d.complete(&[], &SamplingParams::default()).unwrap_err();
        assert_eq!(err, CompletionError::Other("No text in response".to_string()));

        let d = driver(Ok(r#"{"text":null}"#.to_string()));
        assert!(d.complete(&[], &SamplingParams::default()).is_err());
    }

    #[test]
    fn test_driver_propagates_classified_error() {
        let d = driver(Err(CompletionError::Unauthorized));
        let err = d.complete(&[], &SamplingParams::default()).unwrap_err();
        assert_eq!(err, CompletionError::Unauthorized);
    }
}

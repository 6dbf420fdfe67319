//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、最後のユーザー発話をそのまま返します。
//! オフラインでの動作確認やテスト用に使用します。

use crate::error::CompletionError;
use crate::llm::config::SamplingParams;
use crate::llm::provider::LlmProvider;
use crate::msg::{Message, Role};
use serde_json::{json, Value};
use std::time::Duration;

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_request_payload(
        &self,
        context: &[Message],
        params: &SamplingParams,
    ) -> Result<Value, CompletionError> {
        let last_user = context
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content().to_string())
            .unwrap_or_default();
        Ok(json!({
            "model": params.model.to_string(),
            "messages": context.len(),
            "query": last_user,
        }))
    }

    // ネットワークには出ず、ペイロードをそのままレスポンスとして扱う
    fn make_http_request(&self, request_json: &str, _timeout: Duration) -> Result<String, CompletionError> {
        Ok(request_json.to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, CompletionError> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| CompletionError::Other(format!("Failed to parse echo payload: {}", e)))?;
        let query = v["query"].as_str().unwrap_or("");
        let count = v["messages"].as_u64().unwrap_or(0);
        Ok(Some(format!("[echo #{}] {}", count, query)))
    }
}

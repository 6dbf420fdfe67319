//! LLMプロバイダのトレイト定義

use crate::error::CompletionError;
use crate::llm::config::SamplingParams;
use crate::msg::Message;
use serde_json::Value;
use std::time::Duration;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（OpenAI 互換、Echo など）はこのトレイトを実装する必要があります。
/// 送受信の順序は LlmDriver が決める。
pub trait LlmProvider {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `context` - system から始まる会話全体
    /// * `params` - サンプリング設定
    fn make_request_payload(
        &self,
        context: &[Message],
        params: &SamplingParams,
    ) -> Result<Value, CompletionError>;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Arguments
    /// * `request_json` - リクエストJSON文字列
    /// * `timeout` - 応答待ちの上限
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(CompletionError)` - 分類済みの失敗
    fn make_http_request(&self, request_json: &str, timeout: Duration) -> Result<String, CompletionError>;

    /// レスポンスからテキストを抽出（存在しない場合はNone）
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, CompletionError>;
}

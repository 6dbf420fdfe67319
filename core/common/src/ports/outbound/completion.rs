//! 補完サービス Outbound ポート
//!
//! セッションは会話全体とサンプリング設定を渡し、応答 1 件か分類済みの失敗を受け取る。

use crate::error::CompletionError;
use crate::llm::config::SamplingParams;
use crate::msg::Message;

/// 単発の補完（呼び出し元から見て同期。応答かタイムアウトまでブロックする）
///
/// 実装は `common::llm::LlmDriver` やテスト用のスタブなど。
pub trait CompletionService: Send + Sync {
    fn complete(&self, context: &[Message], params: &SamplingParams) -> Result<String, CompletionError>;
}

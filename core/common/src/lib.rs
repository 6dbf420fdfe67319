//! roleplay-chat 共通ライブラリ
//!
//! `chat` コマンドが使うエラー型・メッセージ・LLM プロバイダ・ポートと標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// 会話メッセージ
pub mod msg;

/// LLMドライバーとプロバイダ
pub mod llm;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;

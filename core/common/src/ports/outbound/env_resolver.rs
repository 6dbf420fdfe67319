//! 環境変数解決 Outbound ポート
//!
//! API キー・プロキシ・ログファイル・実行ファイルの場所を解決する。
//! 起動時に一度だけ呼ばれ、結果は設定値としてセッションに渡される。

use crate::domain::Credential;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 指定した環境変数から API キーを取得する（未設定・空文字・空白のみは None）
    fn credential(&self, var: &str) -> Option<Credential>;

    /// 明示的なプロキシ URL（CHAT_PROXY）
    fn proxy(&self) -> Option<String>;

    /// OpenAI 互換エンドポイントのベース URL（OPENAI_BASE_URL）
    fn base_url(&self) -> Option<String>;

    /// 構造化ログ（JSONL）のファイルパス
    ///
    /// 優先順位:
    /// 1. CHAT_LOG_FILE
    /// 2. $XDG_STATE_HOME/roleplay-chat/chat.jsonl
    /// 3. $HOME/.local/state/roleplay-chat/chat.jsonl
    fn resolve_log_file_path(&self) -> Result<PathBuf, Error>;

    /// 実行ファイルのあるディレクトリ（会話記録の既定の保存先）
    fn exe_dir(&self) -> Result<PathBuf, Error>;

    /// カレントディレクトリ
    fn current_dir(&self) -> Result<PathBuf, Error>;
}

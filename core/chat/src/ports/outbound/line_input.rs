//! 対話入力の Outbound ポート

use common::error::Error;

/// 1 行ずつ入力を読む能力
///
/// usecase はこの trait にのみ依存し、adapter が stdin でプロンプトを表示して読む。
pub trait LineInput: Send + Sync {
    /// プロンプトを表示して 1 行読む（末尾の改行は除く）。EOF なら None。
    fn read_line(&self, prompt: &str) -> Result<Option<String>, Error>;
}

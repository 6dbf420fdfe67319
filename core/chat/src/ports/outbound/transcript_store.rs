//! 会話記録の保存 Outbound ポート

use chrono::NaiveDateTime;
use common::error::Error;
use std::path::PathBuf;

/// 会話記録を 1 ファイルとして保存する能力
///
/// 書き込みは開く・書く・閉じるを 1 回で行う。途中経過の追記はしない。
pub trait TranscriptStore: Send + Sync {
    /// セッション開始時刻を名前に含むファイルへ全文を書き、そのパスを返す
    fn save(&self, started_at: &NaiveDateTime, contents: &str) -> Result<PathBuf, Error>;
}

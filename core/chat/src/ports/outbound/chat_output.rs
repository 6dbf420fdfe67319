//! 画面出力の Outbound ポート

/// ユーザーに 1 行表示する能力（実装は stdout やテスト用の記録）
pub trait ChatOutput: Send + Sync {
    fn say(&self, line: &str);
}

//! エラーハンドリング
//!
//! アプリ全体の `Error` と、補完サービス呼び出し専用の `CompletionError` を定義する。
//! `Error` は終了コードを持ち、main がそのままプロセスの終了コードに使う。

/// 終了コード: 引数不正・設定不足（sysexits の EX_USAGE）
pub const EXIT_USAGE: i32 = 64;
/// 終了コード: 内部・初期化エラー（EX_SOFTWARE）
pub const EXIT_SOFTWARE: i32 = 70;
/// 終了コード: I/O エラー（EX_IOERR）
pub const EXIT_IOERR: i32 = 74;

/// エラー型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Env(String),
    #[error("{0}")]
    Json(String),
    #[error("{0}")]
    System(String),
    /// 起動時に API キーが見つからない
    #[error("API key not found ({var} is not set)")]
    MissingCredential { var: String },
    /// 補完クライアントを組み立てられない（キーの形式不正・プロキシ URL 不正など）
    #[error("Failed to initialize the completion client: {0}")]
    ServiceInit(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    pub fn missing_credential(var: impl Into<String>) -> Self {
        Self::MissingCredential { var: var.into() }
    }

    pub fn service_init(msg: impl Into<String>) -> Self {
        Self::ServiceInit(msg.into())
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::Env(_) | Self::MissingCredential { .. } => EXIT_USAGE,
            Self::System(_) | Self::ServiceInit(_) => EXIT_SOFTWARE,
            Self::Io(_) | Self::Json(_) => EXIT_IOERR,
        }
    }

    /// 使い方の表示が必要なエラーか（引数不正のみ）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// ユーザー向けの診断メッセージ（1 行ずつ）
    ///
    /// MissingCredential は「何が無いか」と「どう直すか」の 2 行を返す。
    pub fn diagnostic_lines(&self) -> Vec<String> {
        match self {
            Self::MissingCredential { var } => vec![
                "Error: API key not found".to_string(),
                format!(
                    "Please check that {} is set in the environment (e.g. export {}=<your key>)",
                    var, var
                ),
            ],
            other => vec![other.to_string()],
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// 補完サービス呼び出しの失敗分類
///
/// セッションはどの種別でも終了する（再試行しない）。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompletionError {
    /// API キーが無効・期限切れ
    #[error("unauthorized: the API key was rejected")]
    Unauthorized,
    /// 接続できない（DNS・TLS・ネットワーク断など）
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// タイムアウト内に応答が無い
    #[error("request timed out")]
    TimedOut,
    /// その他（HTTP エラー・不正なレスポンスなど）
    #[error("{0}")]
    Other(String),
}

impl CompletionError {
    /// ログ用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::TimedOut => "timed_out",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::invalid_argument("x").exit_code(), 64);
        assert_eq!(Error::missing_credential("OPENAI_API_KEY").exit_code(), 64);
        assert_eq!(Error::service_init("bad").exit_code(), 70);
        assert_eq!(Error::io_msg("disk").exit_code(), 74);
        assert_eq!(Error::json("bad body").exit_code(), 74);
        assert_eq!(Error::env("HOME is not set").exit_code(), 64);
        assert_eq!(Error::system("no exe").exit_code(), 70);
    }

    #[test]
    fn test_is_usage_only_for_invalid_argument() {
        assert!(Error::invalid_argument("x").is_usage());
        assert!(!Error::missing_credential("K").is_usage());
        assert!(!Error::service_init("x").is_usage());
    }

    #[test]
    fn test_missing_credential_has_two_diagnostic_lines() {
        let lines = Error::missing_credential("OPENAI_API_KEY").diagnostic_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("API key not found"));
        assert!(lines[1].contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_service_init_has_one_diagnostic_line() {
        let lines = Error::service_init("invalid proxy").diagnostic_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("invalid proxy"));
    }

    #[test]
    fn test_completion_error_kind() {
        assert_eq!(CompletionError::Unauthorized.kind(), "unauthorized");
        assert_eq!(CompletionError::TimedOut.kind(), "timed_out");
        assert_eq!(CompletionError::Other("x".into()).to_string(), "x");
    }
}

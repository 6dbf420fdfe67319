//! 失敗の分類からユーザー向け表示と記録用の注記を作る

use common::error::CompletionError;

/// 失敗 1 件分の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    /// 画面に出す診断メッセージ（記録の注記にも使う）
    pub diagnostic: String,
    /// 対処のヒント（無い種別もある）
    pub hint: Option<String>,
}

impl FailureReport {
    pub fn from_completion_error(err: &CompletionError) -> Self {
        match err {
            CompletionError::Unauthorized => Self {
                diagnostic: "Authentication error: the API key is invalid or has expired".to_string(),
                hint: Some("Check that the API key in your environment is correct, or generate a new key".to_string()),
            },
            CompletionError::ConnectionFailed(_) => Self {
                diagnostic: "Network error: could not connect to the API server".to_string(),
                hint: Some("Check your network connection or proxy settings, or try another network".to_string()),
            },
            CompletionError::TimedOut => Self {
                diagnostic: "Request timed out: the server did not respond in time".to_string(),
                hint: Some("The network may be slow; please try again later".to_string()),
            },
            CompletionError::Other(msg) => Self {
                diagnostic: format!("Other error: {}", msg),
                hint: None,
            },
        }
    }

    pub fn input_failure(msg: &str) -> Self {
        Self {
            diagnostic: format!("Input error: {}", msg),
            hint: None,
        }
    }

    /// 画面に出す行（診断 + ヒント）
    pub fn lines(&self) -> Vec<&str> {
        let mut out = vec![self.diagnostic.as_str()];
        if let Some(ref h) = self.hint {
            out.push(h.as_str());
        }
        out
    }

    /// 記録に残す注記
    pub fn note(&self) -> &str {
        &self.diagnostic
    }
}

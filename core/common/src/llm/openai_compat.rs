//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイントを指定可能。失敗は CompletionError に分類して返す。

use crate::domain::Credential;
use crate::error::{CompletionError, Error};
use crate::llm::config::SamplingParams;
use crate::llm::provider::LlmProvider;
use crate::msg::Message;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    base_url: String,
    auth: HeaderValue,
    client: reqwest::blocking::Client,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `credential` - API キー（Authorization: Bearer に使う）
    /// * `base_url` - ベース URL（None のとき DEFAULT_BASE_URL）
    /// * `proxy` - 明示的なプロキシ URL（None のとき環境変数 HTTPS_PROXY 等に従う）
    ///
    /// キーがヘッダにできない・プロキシ URL が不正な場合は Error::ServiceInit。
    pub fn new(
        credential: &Credential,
        base_url: Option<String>,
        proxy: Option<&str>,
    ) -> Result<Self, Error> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| Error::service_init("API key contains characters that cannot be sent in an HTTP header"))?;
        auth.set_sensitive(true);

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(url) = proxy {
            let p = reqwest::Proxy::all(url)
                .map_err(|e| Error::service_init(format!("Invalid proxy '{}': {}", url, e)))?;
            builder = builder.proxy(p);
        }
        let client = builder
            .build()
            .map_err(|e| Error::service_init(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            auth,
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// 送信時の reqwest エラーを分類する
fn classify_transport_error(e: &reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::TimedOut
    } else if e.is_connect() || e.is_request() {
        CompletionError::ConnectionFailed(e.to_string())
    } else {
        CompletionError::Other(format!("HTTP request failed: {}", e))
    }
}

/// 非 2xx 応答を分類する（401 のみ認証エラー、他は API のメッセージを優先して Other）
pub(crate) fn classify_status(status: u16, body: &str) -> CompletionError {
    if status == 401 {
        return CompletionError::Unauthorized;
    }
    let error_msg = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
    CompletionError::Other(format!("Chat completions error: {}", error_msg))
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn make_request_payload(
        &self,
        context: &[Message],
        params: &SamplingParams,
    ) -> Result<Value, CompletionError> {
        let messages: Vec<Value> = context
            .iter()
            .map(|m| json!({ "role": m.role().as_str(), "content": m.content() }))
            .collect();
        Ok(json!({
            "model": params.model.to_string(),
            "messages": messages,
            "temperature": params.temperature,
            "stream": false
        }))
    }

    fn make_http_request(&self, request_json: &str, timeout: Duration) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(self.url())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.auth.clone())
            .timeout(timeout)
            .body(request_json.to_string())
            .send()
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        let response_text = response.text().map_err(|e| {
            if e.is_timeout() {
                CompletionError::TimedOut
            } else {
                CompletionError::ConnectionFailed(format!("Failed to read response: {}", e))
            }
        })?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &response_text));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, CompletionError> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| CompletionError::Other(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(err) = v.get("error") {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(CompletionError::Other(format!("API error: {}", msg)));
        }

        let text = v["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string());
        Ok(text)
    }
}

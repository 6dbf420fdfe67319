//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::Credential;
use crate::error::{CompletionError, Error};
use crate::llm::config::SamplingParams;
use crate::llm::driver::LlmDriver;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::LlmProvider;
use crate::msg::Message;
use serde_json::Value;
use std::time::Duration;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenAI Chat Completions（互換エンドポイント含む）
    OpenAi,
    /// Echo（ネットワークを使わない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" | "openai_compat" => Some(Self::OpenAi),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Echo => "echo",
        }
    }

    /// API キーが必要か
    pub fn requires_credential(&self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

/// プロバイダ作成時のオプション
#[derive(Debug, Clone, Default)]
pub struct ProviderOptions {
    pub credential: Option<Credential>,
    pub base_url: Option<String>,
    pub proxy: Option<String>,
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    OpenAi(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn make_request_payload(
        &self,
        context: &[Message],
        params: &SamplingParams,
    ) -> Result<Value, CompletionError> {
        match self {
            Self::OpenAi(p) => p.make_request_payload(context, params),
            Self::Echo(p) => p.make_request_payload(context, params),
        }
    }

    fn make_http_request(&self, request_json: &str, timeout: Duration) -> Result<String, CompletionError> {
        match self {
            Self::OpenAi(p) => p.make_http_request(request_json, timeout),
            Self::Echo(p) => p.make_http_request(request_json, timeout),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, CompletionError> {
        match self {
            Self::OpenAi(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }
}

/// プロバイダを作成する
///
/// OpenAi で credential が無い場合は Error::MissingCredential を返す
/// （通常は呼び出し側が先に検出する）。
pub fn create_provider(provider_type: ProviderType, options: &ProviderOptions) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::OpenAi => {
            let credential = options
                .credential
                .as_ref()
                .ok_or_else(|| Error::missing_credential("OPENAI_API_KEY"))?;
            let provider = OpenAiCompatProvider::new(
                credential,
                options.base_url.clone(),
                options.proxy.as_deref(),
            )?;
            Ok(AnyProvider::OpenAi(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

/// ドライバーを作成する
pub fn create_driver(provider_type: ProviderType, options: &ProviderOptions) -> Result<LlmDriver<AnyProvider>, Error> {
    let provider = create_provider(provider_type, options)?;
    Ok(LlmDriver::new(provider))
}

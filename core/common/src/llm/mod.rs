//! LLMドライバーとプロバイダの実装
//!
//! プロバイダ（OpenAI 互換、Echo）ごとの差分を LlmProvider に閉じ込め、
//! LlmDriver が CompletionService として共通の送受信処理を提供します。

pub mod config;
pub mod driver;
pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;

pub use config::SamplingParams;
pub use driver::LlmDriver;
pub use factory::{create_driver, create_provider, AnyProvider, ProviderOptions, ProviderType};
pub use provider::LlmProvider;

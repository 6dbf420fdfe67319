//! Outbound ポート: アプリが外界（補完サービス・FS・時刻・環境変数・ログ）を使うための trait

pub mod clock;
pub mod completion;
pub mod env_resolver;
pub mod fs;
pub mod llm_provider;
pub mod log;

pub use clock::Clock;
pub use completion::CompletionService;
pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use llm_provider::LlmProvider;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};

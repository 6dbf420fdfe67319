//! chat のユースケース: 起動時の設定解決とセッションの起動

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use common::domain::{Credential, TranscriptDir};
use common::error::Error;
use common::llm::{create_driver, ProviderOptions, ProviderType, SamplingParams};
use common::ports::outbound::{
    Clock, CompletionService, EnvResolver, FileSystem, Log, LogLevel, LogRecord,
};

use crate::adapter::FileTranscriptStore;
use crate::cli::Config;
use crate::domain::Persona;
use crate::ports::outbound::{ChatOutput, LineInput};
use crate::usecase::session::{ConversationSession, SessionDeps, SessionSettings, SessionSummary};

/// API キーを読む既定の環境変数
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

// --- 責務別 Deps（usecase が定義を所有し、wiring は組み立てるだけ）

pub struct ChatDeps {
    pub io: IoDeps,
    pub system: SystemDeps,
    pub obs: ObsDeps,
}

pub struct IoDeps {
    pub input: Arc<dyn LineInput>,
    pub output: Arc<dyn ChatOutput>,
}

pub struct SystemDeps {
    pub env_resolver: Arc<dyn EnvResolver>,
    pub fs: Arc<dyn FileSystem>,
    pub clock: Arc<dyn Clock>,
}

pub struct ObsDeps {
    pub log: Arc<dyn Log>,
}

/// 起動時に一度だけ解決する設定
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub provider: ProviderType,
    pub credential: Option<Credential>,
    pub base_url: Option<String>,
    pub proxy: Option<String>,
    pub params: SamplingParams,
    pub persona: Persona,
    pub transcript_dir: TranscriptDir,
}

/// chat のユースケース（アダプター経由で I/O を行う）
pub struct ChatUseCase {
    deps: ChatDeps,
}

impl ChatUseCase {
    pub fn new(deps: ChatDeps) -> Self {
        Self { deps }
    }

    /// 引数と環境から設定を解決する。
    ///
    /// ここで失敗した場合は会話状態も会話記録も作られない。
    pub fn resolve_settings(&self, config: &Config) -> Result<ChatSettings, Error> {
        let env = &self.deps.system.env_resolver;

        let provider = match config.profile.as_deref() {
            None => ProviderType::OpenAi,
            Some(name) => ProviderType::parse(name).ok_or_else(|| {
                Error::invalid_argument(format!("Unknown provider: '{}' (expected openai or echo)", name))
            })?,
        };

        let defaults = SamplingParams::default();
        let params = SamplingParams {
            model: config
                .model
                .clone()
                .unwrap_or_else(|| defaults.model.clone()),
            temperature: config.temperature.unwrap_or(defaults.temperature),
            timeout: config
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };
        params.validate()?;

        let key_var = config
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV);
        let credential = env.credential(key_var);
        if provider.requires_credential() && credential.is_none() {
            return Err(Error::missing_credential(key_var));
        }

        let persona = match config.system.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Persona::default().with_instruction(s),
            _ => Persona::default(),
        };

        Ok(ChatSettings {
            provider,
            credential,
            base_url: config.base_url.clone().or_else(|| env.base_url()),
            proxy: config.proxy.clone().or_else(|| env.proxy()),
            params,
            persona,
            transcript_dir: TranscriptDir::new(self.transcript_dir(config)?),
        })
    }

    /// -o 指定 → 実行ファイルのディレクトリ → カレントディレクトリ
    fn transcript_dir(&self, config: &Config) -> Result<PathBuf, Error> {
        if let Some(ref dir) = config.out_dir {
            return Ok(dir.clone());
        }
        let env = &self.deps.system.env_resolver;
        env.exe_dir().or_else(|_| env.current_dir())
    }

    /// 補完サービスを組み立てる（キー・プロキシ不正は Error::ServiceInit）
    pub fn build_completion(&self, settings: &ChatSettings) -> Result<Arc<dyn CompletionService>, Error> {
        let options = ProviderOptions {
            credential: settings.credential.clone(),
            base_url: settings.base_url.clone(),
            proxy: settings.proxy.clone(),
        };
        let driver = create_driver(settings.provider, &options)?;
        self.log(
            LogRecord::new(LogLevel::Info, "usecase", "startup", "completion service ready")
                .field("provider", settings.provider.as_str())
                .field("proxy", settings.proxy.is_some())
                .field("custom_base_url", settings.base_url.is_some()),
        );
        Ok(Arc::new(driver))
    }

    /// 解決済みの設定と補完サービスからセッションを作る
    pub fn session(
        &self,
        settings: ChatSettings,
        completion: Arc<dyn CompletionService>,
    ) -> ConversationSession {
        let store = FileTranscriptStore::new(Arc::clone(&self.deps.system.fs), settings.transcript_dir);
        let deps = SessionDeps {
            completion,
            input: Arc::clone(&self.deps.io.input),
            output: Arc::clone(&self.deps.io.output),
            store: Arc::new(store),
            clock: Arc::clone(&self.deps.system.clock),
            log: Arc::clone(&self.deps.obs.log),
        };
        ConversationSession::new(
            deps,
            SessionSettings {
                persona: settings.persona,
                params: settings.params,
            },
        )
    }

    /// 設定解決 → 補完サービス作成 → セッション実行
    ///
    /// 起動時の失敗だけを Err で返す。セッション中の失敗は SessionSummary に入る。
    pub fn run(&self, config: &Config) -> Result<SessionSummary, Error> {
        let settings = self.resolve_settings(config)?;
        let completion = self.build_completion(&settings)?;
        Ok(self.session(settings, completion).run())
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.obs.log.log(&record);
    }
}

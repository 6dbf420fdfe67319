//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StderrLog, StdClock, StdEnvResolver, StdFileSystem, TeeLog};
use common::ports::outbound::{EnvResolver, FileSystem, Log};

use crate::adapter::{StdinLineInput, StdoutOutput};
use crate::usecase::app::{ChatDeps, ChatUseCase, IoDeps, ObsDeps, SystemDeps};

/// main が使う組み立て済みアプリ
pub struct App {
    pub chat_use_case: ChatUseCase,
    pub logger: Arc<dyn Log>,
}

/// ログ出力先: 解決できたファイル（-v なら stderr にも）。ファイルが決まらなければ stderr のみか無効。
fn build_logger(fs: &Arc<dyn FileSystem>, env_resolver: &dyn EnvResolver, verbose: bool) -> Arc<dyn Log> {
    let file: Option<Arc<dyn Log>> = env_resolver
        .resolve_log_file_path()
        .ok()
        .map(|path| Arc::new(FileJsonLog::new(Arc::clone(fs), path)) as Arc<dyn Log>);
    let stderr: Arc<dyn Log> = Arc::new(StderrLog);
    match (file, verbose) {
        (Some(file), true) => Arc::new(TeeLog::new(vec![file, stderr])),
        (Some(file), false) => file,
        (None, true) => stderr,
        (None, false) => Arc::new(NoopLog),
    }
}

/// 配線: 標準アダプタで ChatUseCase を組み立てる
pub fn wire_chat(verbose: bool) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let logger = build_logger(&fs, env_resolver.as_ref(), verbose);

    let deps = ChatDeps {
        io: IoDeps {
            input: Arc::new(StdinLineInput::new()),
            output: Arc::new(StdoutOutput::new()),
        },
        system: SystemDeps {
            env_resolver,
            fs,
            clock: Arc::new(StdClock),
        },
        obs: ObsDeps {
            log: Arc::clone(&logger),
        },
    };
    App {
        chat_use_case: ChatUseCase::new(deps),
        logger,
    }
}

use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 構造化ログを stderr にも出力する
    pub verbose: bool,
    /// -p / --profile: openai（既定）または echo
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub temperature: Option<f32>,
    /// --timeout: 1 リクエストの応答待ち上限（秒）
    pub timeout_secs: Option<u64>,
    /// -S / --system: ペルソナ指示を差し替える
    pub system: Option<String>,
    /// --proxy: HTTP クライアントに渡すプロキシ URL（未指定時は CHAT_PROXY）
    pub proxy: Option<String>,
    /// --base-url: OpenAI 互換エンドポイント（未指定時は OPENAI_BASE_URL）
    pub base_url: Option<String>,
    /// -o / --out-dir: 会話記録の保存先（未指定時は実行ファイルのディレクトリ）
    pub out_dir: Option<PathBuf>,
    /// --api-key-env: API キーを読む環境変数名（既定 OPENAI_API_KEY）
    pub api_key_env: Option<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("chat")
        .about("Chat with a role-play persona through an LLM and save the transcript")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("LLM profile: openai (default) or echo (offline)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (default: gpt-3.5-turbo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("temperature")
                .short('t')
                .long("temperature")
                .value_name("0..1")
                .help("Sampling temperature (default: 0.8)")
                .value_parser(value_parser!(f32))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout")
                .long("timeout")
                .value_name("secs")
                .help("Request timeout in seconds (default: 60)")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("system")
                .short('S')
                .long("system")
                .value_name("instruction")
                .help("Replace the persona instruction")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("proxy")
                .long("proxy")
                .value_name("url")
                .help("Proxy for API requests (default: $CHAT_PROXY)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("base-url")
                .long("base-url")
                .value_name("url")
                .help("OpenAI-compatible base URL (default: $OPENAI_BASE_URL or api.openai.com)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("dir")
                .help("Directory for chat_record_*.txt (default: the executable's directory)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("api-key-env")
                .long("api-key-env")
                .value_name("VAR")
                .help("Environment variable holding the API key (default: OPENAI_API_KEY)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        temperature: matches.get_one::<f32>("temperature").copied(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        system: matches.get_one::<String>("system").cloned(),
        proxy: matches.get_one::<String>("proxy").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        out_dir: matches.get_one::<PathBuf>("out-dir").cloned(),
        api_key_env: matches.get_one::<String>("api-key-env").cloned(),
    }
}

fn matches_to_outcome(matches: &clap::ArgMatches) -> ParseOutcome {
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return ParseOutcome::GenerateCompletion(shell);
    }
    ParseOutcome::Config(matches_to_config(matches))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_outcome(&matches))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_outcome(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "chat", &mut std::io::stdout());
}

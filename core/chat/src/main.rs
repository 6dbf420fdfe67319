mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use cli::{parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use ports::inbound::RunChatApp;
use wiring::{wire_chat, App};

/// セッションを 1 回実行する Runner
struct Runner {
    app: App,
}

impl RunChatApp for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        if config.help {
            print_help();
            return Ok(0);
        }
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command started")
                .field("profile", config.profile.as_deref().unwrap_or("openai")),
        );

        // セッション中の失敗（認証・通信・保存）は終了コード 0 のまま summary に入る
        let result = self.app.chat_use_case.run(&config).map(|summary| {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command finished")
                    .field("end", summary.end.as_str())
                    .field("session_error", summary.end.is_error())
                    .field("turns", summary.turns)
                    .field("saved", summary.transcript_path.is_some())
                    .field("exit_code", 0),
            );
            0
        });
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, "cli", "error", e.to_string())
                    .field("exit_code", e.exit_code()),
            );
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
                eprintln!("chat: {}", e);
            } else {
                for line in e.diagnostic_lines() {
                    println!("{}", line);
                }
            }
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let runner = Runner {
        app: wire_chat(config.verbose),
    };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: chat [options]");
}

fn print_help() {
    println!("Usage: chat [options]");
    println!("Chat with a British passer-by in London. Type 'exit' or 'bye' to end.");
    println!("The conversation is saved as chat_record_YYYYMMDD_HHMMSS.txt when it ends.");
    println!("Options:");
    println!("  -h, --help                    Show this help message");
    println!("  -v, --verbose                 Mirror structured logs to stderr");
    println!("  -p, --profile <profile>       openai (default) or echo (offline)");
    println!("  -m, --model <model>           Model name (default: gpt-3.5-turbo)");
    println!("  -t, --temperature <0..1>      Sampling temperature (default: 0.8)");
    println!("      --timeout <secs>          Request timeout in seconds (default: 60)");
    println!("  -S, --system <instruction>    Replace the persona instruction");
    println!("      --proxy <url>             Proxy for API requests (default: $CHAT_PROXY)");
    println!("      --base-url <url>          OpenAI-compatible base URL (default: $OPENAI_BASE_URL)");
    println!("  -o, --out-dir <dir>           Where to save transcripts (default: executable's directory)");
    println!("      --api-key-env <VAR>       Environment variable holding the API key (default: OPENAI_API_KEY)");
    println!("      --generate <shell>        Generate shell completion script (bash, zsh, fish, ...)");
    println!("Environment:");
    println!("  OPENAI_API_KEY                API key (required for the openai profile)");
    println!("  CHAT_LOG_FILE                 Structured log file (default: $XDG_STATE_HOME/roleplay-chat/chat.jsonl)");
}

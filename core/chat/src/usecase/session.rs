//! 会話セッション（1 本の入力 → 補完 → 表示ループ）
//!
//! 初回の定型リクエスト、ターンループ、終了時の会話記録保存を順に行う。
//! 補完の失敗はここで捕まえて終了遷移と注記に変え、セッションの外には出さない。

use std::path::PathBuf;
use std::sync::Arc;

use common::error::CompletionError;
use common::llm::SamplingParams;
use common::ports::outbound::{Clock, CompletionService, Log, LogLevel, LogRecord};

use crate::domain::transcript::SEPARATOR;
use crate::domain::{ChatCommand, ConversationState, FailureReport, Persona, SessionEnd};
use crate::ports::outbound::{ChatOutput, LineInput, TranscriptStore};

const PROMPT: &str = "You: ";

/// セッションが使う外界
pub struct SessionDeps {
    pub completion: Arc<dyn CompletionService>,
    pub input: Arc<dyn LineInput>,
    pub output: Arc<dyn ChatOutput>,
    pub store: Arc<dyn TranscriptStore>,
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

/// セッション中は変わらない設定
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub persona: Persona,
    pub params: SamplingParams,
}

/// 1 セッションの結果
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    /// 保存できた会話記録（保存に失敗したら None）
    pub transcript_path: Option<PathBuf>,
    /// 成功したユーザーターン数（開始時の定型のやり取りは含まない）
    pub turns: usize,
    /// 終了時点の Message 数
    pub context_len: usize,
}

pub struct ConversationSession {
    deps: SessionDeps,
    settings: SessionSettings,
}

impl ConversationSession {
    pub fn new(deps: SessionDeps, settings: SessionSettings) -> Self {
        Self { deps, settings }
    }

    /// 初期化 → ループ → 保存。どの経路で終わっても保存はちょうど 1 回。
    pub fn run(&self) -> SessionSummary {
        let (mut state, early_end) = self.initialize();
        let end = match early_end {
            Some(end) => end,
            None => self.run_loop(&mut state),
        };
        let context_len = state.context().len();
        // system + 定型のやり取り 2 件を除いた user/assistant の組数
        let turns = context_len.saturating_sub(3) / 2;
        let transcript_path = self.finalize(state, &end);
        SessionSummary {
            end,
            transcript_path,
            turns,
            context_len,
        }
    }

    /// system メッセージだけの状態を作り、定型の最初の発話を送る。
    ///
    /// 最初のリクエストが失敗したら終了理由を返す（ループには入らない）。
    pub fn initialize(&self) -> (ConversationState, Option<SessionEnd>) {
        let persona = &self.settings.persona;
        let mut state = ConversationState::new(persona, self.deps.clock.now());
        self.log(
            LogRecord::new(LogLevel::Info, "usecase", "session", "session started")
                .field("model", self.settings.params.model.to_string())
                .field("temperature", self.settings.params.temperature)
                .field("timeout_secs", self.settings.params.timeout.as_secs()),
        );

        let out = &self.deps.output;
        out.say(&persona.title);
        out.say(&format!("I say: {}", persona.opening_line));
        out.say("Tip: Type 'exit' or 'bye' to end the conversation");
        out.say(SEPARATOR);

        state.record_opening(&persona.opening_line);
        state.begin_request(&persona.opening_line);
        match self.request(&state, 0) {
            Ok(reply) => {
                self.show_reply(&reply);
                state.accept_reply(&reply, None);
                (state, None)
            }
            Err(e) => {
                self.report_failure(&mut state, FailureReport::from_completion_error(&e));
                (state, Some(SessionEnd::CompletionFailed(e)))
            }
        }
    }

    /// 入力待ちと応答待ちを繰り返す。終了コマンド・入力終端・失敗で戻る。
    pub fn run_loop(&self, state: &mut ConversationState) -> SessionEnd {
        let mut turn = 0usize;
        loop {
            let line = match self.deps.input.read_line(PROMPT) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    state.terminate();
                    return SessionEnd::InputClosed;
                }
                Err(e) => {
                    let msg = e.to_string();
                    self.report_failure(state, FailureReport::input_failure(&msg));
                    return SessionEnd::InputFailed(msg);
                }
            };
            state.record_input(&line, &self.deps.clock.now());

            let text = match ChatCommand::parse(&line) {
                ChatCommand::Quit => {
                    let farewell = &self.settings.persona.farewell;
                    self.show_reply(farewell);
                    state.record_farewell(farewell, &self.deps.clock.now());
                    return SessionEnd::Farewell;
                }
                ChatCommand::Say(text) => text,
            };

            turn += 1;
            state.begin_request(&text);
            match self.request(state, turn) {
                Ok(reply) => {
                    self.show_reply(&reply);
                    state.accept_reply(&reply, Some(&self.deps.clock.now()));
                }
                Err(e) => {
                    self.report_failure(state, FailureReport::from_completion_error(&e));
                    return SessionEnd::CompletionFailed(e);
                }
            }
        }
    }

    /// 終了時刻を記録して会話記録を保存する。
    ///
    /// state を消費するので 1 セッションにつき 1 回しか呼べない。
    /// 保存の失敗は表示とログに留め、呼び出し元には返さない。
    pub fn finalize(&self, mut state: ConversationState, end: &SessionEnd) -> Option<PathBuf> {
        let contents = state.close(self.deps.clock.now());
        let started_at = *state.transcript().started_at();
        let out = &self.deps.output;
        match self.deps.store.save(&started_at, &contents) {
            Ok(path) => {
                out.say("");
                out.say(&format!("Transcript saved to: {}", path.display()));
                self.log(
                    LogRecord::new(LogLevel::Info, "usecase", "transcript", "session finished")
                        .field("end", end.as_str())
                        .field("messages", state.context().len())
                        .field("path", path.display().to_string()),
                );
                Some(path)
            }
            Err(e) => {
                out.say("");
                out.say(&format!("Failed to save transcript: {}", e));
                self.log(
                    LogRecord::new(LogLevel::Warn, "usecase", "transcript", "transcript save failed")
                        .field("end", end.as_str())
                        .field("error", e.to_string()),
                );
                None
            }
        }
    }

    fn request(&self, state: &ConversationState, turn: usize) -> Result<String, CompletionError> {
        let result = self
            .deps
            .completion
            .complete(state.context(), &self.settings.params);
        let rec = match result {
            Ok(_) => LogRecord::new(LogLevel::Info, "usecase", "completion", "completion ok"),
            Err(ref e) => LogRecord::new(LogLevel::Error, "usecase", "completion", "completion failed")
                .field("error_kind", e.kind())
                .field("error", e.to_string()),
        };
        self.log(rec.field("turn", turn).field("context_len", state.context().len()));
        result
    }

    fn show_reply(&self, reply: &str) {
        self.deps
            .output
            .say(&format!("{}: {}", self.settings.persona.speaker, reply));
    }

    fn report_failure(&self, state: &mut ConversationState, report: FailureReport) {
        for line in report.lines() {
            self.deps.output.say(line);
        }
        state.record_failure(report.note(), &self.deps.clock.now());
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record);
    }
}

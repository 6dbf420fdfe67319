//! 会話状態とセッションの状態遷移
//!
//! INIT → AWAITING_INPUT → (AWAITING_REPLY → AWAITING_INPUT)* → TERMINATED
//! Message 列は system 1 件で始まり、以降 user / assistant が交互に並ぶ（追記のみ）。

use chrono::NaiveDateTime;
use common::error::CompletionError;
use common::msg::Message;

use crate::domain::persona::Persona;
use crate::domain::transcript::{Speaker, Transcript, TranscriptEntry};

/// セッションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Init,
    AwaitingInput,
    AwaitingReply,
    Terminated,
}

impl SessionPhase {
    /// 許される遷移か
    ///
    /// Init からは開始時の定型リクエスト（AwaitingReply）へ進む。
    /// どの状態からも Terminated に到達できる。
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Init, AwaitingReply)
                | (Init, AwaitingInput)
                | (AwaitingInput, AwaitingReply)
                | (AwaitingReply, AwaitingInput)
                | (Init, Terminated)
                | (AwaitingInput, Terminated)
                | (AwaitingReply, Terminated)
        )
    }
}

/// セッションが終わった理由
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// exit / bye が入力された
    Farewell,
    /// 入力が EOF に達した
    InputClosed,
    /// 入力の読み取りに失敗した
    InputFailed(String),
    /// 補完サービスの呼び出しに失敗した
    CompletionFailed(CompletionError),
}

impl SessionEnd {
    /// ログ用の名前
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farewell => "farewell",
            Self::InputClosed => "input_closed",
            Self::InputFailed(_) => "input_failed",
            Self::CompletionFailed(_) => "completion_failed",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::InputFailed(_) | Self::CompletionFailed(_))
    }
}

/// 会話状態（API に送る Message 列と会話記録）
#[derive(Debug, Clone)]
pub struct ConversationState {
    context: Vec<Message>,
    transcript: Transcript,
    phase: SessionPhase,
}

impl ConversationState {
    /// ペルソナの指示文を system として 1 件だけ持つ状態を作る
    pub fn new(persona: &Persona, started_at: NaiveDateTime) -> Self {
        Self {
            context: vec![Message::system(persona.instruction.clone())],
            transcript: Transcript::new(started_at, persona.label.clone(), persona.speaker.clone()),
            phase: SessionPhase::Init,
        }
    }

    pub fn context(&self) -> &[Message] {
        &self.context
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn set_phase(&mut self, next: SessionPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }

    /// 入力 1 行を記録する（送信するかどうかに関わらず）
    pub fn record_input(&mut self, line: &str, at: &NaiveDateTime) {
        self.transcript
            .push(TranscriptEntry::new(Some(at), Speaker::User, line));
    }

    /// 開始時の定型発話を記録する（時刻なし）
    pub fn record_opening(&mut self, line: &str) {
        self.transcript
            .push(TranscriptEntry::new(None, Speaker::User, line));
    }

    /// user メッセージを追加して応答待ちに入る
    pub fn begin_request(&mut self, text: &str) {
        self.context.push(Message::user(text));
        self.set_phase(SessionPhase::AwaitingReply);
    }

    /// 応答を追加して入力待ちに戻る（at が None なら記録に時刻を付けない）
    pub fn accept_reply(&mut self, reply: &str, at: Option<&NaiveDateTime>) {
        self.context.push(Message::assistant(reply));
        self.transcript
            .push(TranscriptEntry::new(at, Speaker::Assistant, reply));
        self.set_phase(SessionPhase::AwaitingInput);
    }

    /// 別れの挨拶を記録して終了する（API には送らない）
    pub fn record_farewell(&mut self, farewell: &str, at: &NaiveDateTime) {
        self.transcript
            .push(TranscriptEntry::new(Some(at), Speaker::Assistant, farewell));
        self.set_phase(SessionPhase::Terminated);
    }

    /// エラー注記を記録して終了する
    pub fn record_failure(&mut self, note: &str, at: &NaiveDateTime) {
        self.transcript
            .push(TranscriptEntry::new(Some(at), Speaker::SystemNote, note));
        self.set_phase(SessionPhase::Terminated);
    }

    /// 注記なしで終了する（入力 EOF）
    pub fn terminate(&mut self) {
        self.set_phase(SessionPhase::Terminated);
    }

    /// 終了時刻を記録し、ファイルに書く全文を返す
    pub fn close(&mut self, ended_at: NaiveDateTime) -> String {
        if self.phase != SessionPhase::Terminated {
            self.set_phase(SessionPhase::Terminated);
        }
        self.transcript.close(ended_at);
        self.transcript.render()
    }
}

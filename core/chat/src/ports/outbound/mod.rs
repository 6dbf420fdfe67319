//! Outbound ポート: アプリが外界（端末入出力・会話記録の保存）を使うための trait

pub mod chat_output;
pub mod line_input;
pub mod transcript_store;

pub use chat_output::ChatOutput;
pub use line_input::LineInput;
pub use transcript_store::TranscriptStore;

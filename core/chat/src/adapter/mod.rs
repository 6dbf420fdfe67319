//! Outbound ポートの標準実装（端末入出力・会話記録ファイル）

pub(crate) mod file_transcript_store;
pub(crate) mod stdin_line_input;
pub(crate) mod stdout_output;

pub(crate) use file_transcript_store::FileTranscriptStore;
pub(crate) use stdin_line_input::StdinLineInput;
pub(crate) use stdout_output::StdoutOutput;

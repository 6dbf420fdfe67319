//! chat 固有のドメイン型（型と不変条件）

pub mod command;
pub mod failure;
pub mod persona;
pub mod session_state;
pub mod transcript;

pub use command::ChatCommand;
pub use failure::FailureReport;
pub use persona::Persona;
pub use session_state::{ConversationState, SessionEnd, SessionPhase};
pub use transcript::{Speaker, Transcript, TranscriptEntry};

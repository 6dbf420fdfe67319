//! stdout へ出力する ChatOutput 実装

use crate::ports::outbound::ChatOutput;

pub struct StdoutOutput;

impl StdoutOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatOutput for StdoutOutput {
    fn say(&self, line: &str) {
        println!("{}", line);
    }
}

//! 標準入力から 1 行ずつ読む LineInput 実装

use crate::ports::outbound::LineInput;
use common::error::Error;
use std::io::{self, BufRead, Write};

/// プロンプトを stdout に出し、stdin から 1 行読む
pub struct StdinLineInput;

impl StdinLineInput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinLineInput {
    fn default() -> Self {
        Self::new()
    }
}

/// 末尾の改行（\n / \r\n）だけを取り除く
fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

impl LineInput for StdinLineInput {
    fn read_line(&self, prompt: &str) -> Result<Option<String>, Error> {
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(strip_newline(line)))
    }
}

//! 入力 1 行の解釈（Command Pattern）
//!
//! 終了コマンドか、相手に送る発話かを enum で明示する。

/// ユーザー入力 1 行の解釈結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// 会話を終える（exit / bye、大文字小文字・前後の空白は無視）
    Quit,
    /// 相手に送る発話（入力はそのまま保持する）
    Say(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "exit" | "bye" => Self::Quit,
            _ => Self::Say(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_words_case_insensitive() {
        for w in ["exit", "EXIT", "Bye", "bYe", "  exit  "] {
            assert_eq!(ChatCommand::parse(w), ChatCommand::Quit, "{:?}", w);
        }
    }

    #[test]
    fn test_other_input_is_say() {
        assert_eq!(
            ChatCommand::parse("goodbye then"),
            ChatCommand::Say("goodbye then".to_string())
        );
        assert_eq!(ChatCommand::parse("exit now"), ChatCommand::Say("exit now".to_string()));
        assert_eq!(ChatCommand::parse(""), ChatCommand::Say(String::new()));
    }
}

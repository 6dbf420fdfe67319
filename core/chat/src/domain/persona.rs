//! 会話相手のペルソナ
//!
//! system メッセージになる指示文と、画面・記録に出す名前や定型文をまとめて持つ。

const BRITISH_PASSER_BY: &str = "You are a regular British passer-by in London. You speak natural English with a slight British accent (e.g., using \"mate\", \"cheers\", \"lovely\" in daily conversation).
Your personality: friendly, casual, and a bit chatty. You can talk about everyday topics like weather, food, public transport, or local events.
Avoid using overly formal language. Respond naturally as if having a real chat on the street.
Always reply in English.";

/// ペルソナ定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// 記録ヘッダに書くペルソナの説明
    pub label: String,
    /// 画面・記録での相手の呼び名
    pub speaker: String,
    /// system メッセージとして送る指示文
    pub instruction: String,
    /// セッション開始時にユーザー側として送る最初の発話
    pub opening_line: String,
    /// 終了コマンド時に相手が言う定型の別れの挨拶
    pub farewell: String,
    /// 起動時のタイトル行
    pub title: String,
}

impl Persona {
    /// 既定のペルソナ: ロンドンの通りすがりの英国人
    pub fn british_passer_by() -> Self {
        Self {
            label: "A British passer-by in London (English conversation)".to_string(),
            speaker: "Passer-by".to_string(),
            instruction: BRITISH_PASSER_BY.to_string(),
            opening_line: "Hi there!".to_string(),
            farewell: "Cheers, mate! Have a good day!".to_string(),
            title: "English Chat with British Passer-by".to_string(),
        }
    }

    /// 指示文だけを差し替える（呼び名・定型文は既定のまま）
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self.label = "Custom persona".to_string();
        self
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::british_passer_by()
    }
}

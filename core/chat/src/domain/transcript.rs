//! 会話記録（人が読むためのログ）
//!
//! API に送る Message 列とは別に持つ。ヘッダ・区切り線・時刻は記録側にだけ現れる。
//! 追記のみで、終了時刻は一度だけ設定できる。

use chrono::NaiveDateTime;

pub const SEPARATOR: &str = "-----------------------------------";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

/// 記録行の話者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
    /// エラーなどの注記
    SystemNote,
}

/// 記録 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// `HH:MM:SS`（開始時の定型のやり取りには付かない）
    pub timestamp: Option<String>,
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(timestamp: Option<&NaiveDateTime>, speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.map(|t| t.format(TIME_FORMAT).to_string()),
            speaker,
            text: text.into(),
        }
    }
}

/// 1 セッション分の会話記録
#[derive(Debug, Clone)]
pub struct Transcript {
    started_at: NaiveDateTime,
    persona_label: String,
    assistant_name: String,
    entries: Vec<TranscriptEntry>,
    ended_at: Option<NaiveDateTime>,
}

impl Transcript {
    pub fn new(
        started_at: NaiveDateTime,
        persona_label: impl Into<String>,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            started_at,
            persona_label: persona_label.into(),
            assistant_name: assistant_name.into(),
            entries: Vec::new(),
            ended_at: None,
        }
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn started_at(&self) -> &NaiveDateTime {
        &self.started_at
    }

    pub fn ended_at(&self) -> Option<&NaiveDateTime> {
        self.ended_at.as_ref()
    }

    /// 終了時刻を記録する。2 回目以降は無視して false を返す。
    pub fn close(&mut self, ended_at: NaiveDateTime) -> bool {
        if self.ended_at.is_some() {
            return false;
        }
        self.ended_at = Some(ended_at);
        true
    }

    /// 注記の件数
    pub fn note_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.speaker == Speaker::SystemNote)
            .count()
    }

    fn speaker_label(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::User => "You",
            Speaker::Assistant => self.assistant_name.as_str(),
            Speaker::SystemNote => "Note",
        }
    }

    /// ファイルに書く全文（UTF-8、行末は \n）
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("Session started: {}", self.started_at.format(DATE_TIME_FORMAT)),
            format!("Persona: {}", self.persona_label),
            SEPARATOR.to_string(),
        ];
        for e in &self.entries {
            let label = self.speaker_label(e.speaker);
            let body = match e.timestamp {
                Some(ref ts) => format!("[{}] {}: {}", ts, label, e.text),
                None => format!("{}: {}", label, e.text),
            };
            // 注記は前後の会話と区別するため空行を挟む
            if e.speaker == Speaker::SystemNote {
                lines.push(String::new());
            }
            lines.push(body);
        }
        if let Some(ref end) = self.ended_at {
            lines.push(String::new());
            lines.push(SEPARATOR.to_string());
            lines.push(format!("Session ended: {}", end.format(DATE_TIME_FORMAT)));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_render_layout() {
        let mut t = Transcript::new(at(9, 0, 0), "A British passer-by", "Passer-by");
        t.push(TranscriptEntry::new(None, Speaker::User, "Hi there!"));
        t.push(TranscriptEntry::new(None, Speaker::Assistant, "Alright, mate?"));
        t.push(TranscriptEntry::new(Some(&at(9, 0, 5)), Speaker::User, "Nice weather"));
        t.push(TranscriptEntry::new(Some(&at(9, 0, 6)), Speaker::Assistant, "Lovely!"));
        assert!(t.close(at(9, 1, 0)));

        let expected = "\
Session started: 2026-10-18 09:00:00
Persona: A British passer-by
-----------------------------------
You: Hi there!
Passer-by: Alright, mate?
[09:00:05] You: Nice weather
[09:00:06] Passer-by: Lovely!

-----------------------------------
Session ended: 2026-10-18 09:01:00
";
        assert_eq!(t.render(), expected);
    }

    #[test]
    fn test_note_is_set_apart() {
        let mut t = Transcript::new(at(9, 0, 0), "p", "Passer-by");
        t.push(TranscriptEntry::new(Some(&at(9, 0, 1)), Speaker::SystemNote, "Request timed out"));
        let rendered = t.render();
        assert!(rendered.contains("\n\n[09:00:01] Note: Request timed out\n"));
        assert_eq!(t.note_count(), 1);
    }

    #[test]
    fn test_close_only_once() {
        let mut t = Transcript::new(at(9, 0, 0), "p", "Passer-by");
        assert!(t.close(at(9, 5, 0)));
        assert!(!t.close(at(9, 6, 0)));
        assert_eq!(t.ended_at(), Some(&at(9, 5, 0)));
        assert_eq!(t.render().matches("Session ended").count(), 1);
    }

    #[test]
    fn test_open_transcript_has_no_end_line() {
        let t = Transcript::new(at(9, 0, 0), "p", "Passer-by");
        assert!(!t.render().contains("Session ended"));
    }
}

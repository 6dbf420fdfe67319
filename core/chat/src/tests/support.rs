//! テスト用のスタブ（入力・出力・補完・時刻・FS・ログ）

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use common::domain::Credential;
use common::error::{CompletionError, Error};
use common::llm::SamplingParams;
use common::msg::Message;
use common::ports::outbound::{
    Clock, CompletionService, EnvResolver, FileSystem, Log, LogRecord,
};

use crate::ports::outbound::{ChatOutput, LineInput};

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// 決められた行を順に返し、尽きたら EOF
pub struct ScriptedInput {
    lines: Mutex<VecDeque<Result<Option<String>, Error>>>,
    reads: AtomicUsize,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().map(|l| Ok(Some(l.to_string()))).collect()),
            reads: AtomicUsize::new(0),
        }
    }

    /// 行を返し終えたあと読み取りエラーを返す
    pub fn failing_after(lines: &[&str], msg: &str) -> Self {
        let input = Self::new(lines);
        input
            .lines
            .lock()
            .unwrap()
            .push_back(Err(Error::io_msg(msg)));
        input
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl LineInput for ScriptedInput {
    fn read_line(&self, _prompt: &str) -> Result<Option<String>, Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.lines.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

/// 表示された行を貯める
#[derive(Default)]
pub struct RecordingOutput {
    lines: Mutex<Vec<String>>,
}

impl RecordingOutput {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl ChatOutput for RecordingOutput {
    fn say(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// 決められた結果を順に返す補完サービス（尽きたら固定の返答）
pub struct ScriptedCompletion {
    results: Mutex<VecDeque<Result<String, CompletionError>>>,
    /// 呼び出しごとの context
    contexts: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedCompletion {
    pub fn replying() -> Self {
        Self::new(vec![])
    }

    pub fn new(results: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.contexts.lock().unwrap().len()
    }

    pub fn context_lens(&self) -> Vec<usize> {
        self.contexts.lock().unwrap().iter().map(|c| c.len()).collect()
    }

    pub fn last_context(&self) -> Vec<Message> {
        self.contexts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl CompletionService for ScriptedCompletion {
    fn complete(&self, context: &[Message], _params: &SamplingParams) -> Result<String, CompletionError> {
        self.contexts.lock().unwrap().push(context.to_vec());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Lovely weather today, isn't it?".to_string()))
    }
}

/// 呼ばれるたびに 1 秒進む時計
pub struct SteppingClock {
    now: Mutex<NaiveDateTime>,
}

impl SteppingClock {
    pub fn starting_at(t: NaiveDateTime) -> Self {
        Self { now: Mutex::new(t) }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let mut now = self.now.lock().unwrap();
        let t = *now;
        *now = t + Duration::seconds(1);
        t
    }
}

/// 書き込みが必ず失敗する FS
pub struct ReadOnlyFileSystem;

impl FileSystem for ReadOnlyFileSystem {
    fn write_new(&self, path: &Path, _contents: &str) -> Result<bool, Error> {
        Err(Error::io_msg(format!("Permission denied: {}", path.display())))
    }

    fn create_dir_all(&self, _path: &Path) -> Result<(), Error> {
        Ok(())
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        Err(Error::io_msg(format!("Permission denied: {}", path.display())))
    }
}

/// JSONL 1 行分の文字列としてレコードを貯める
#[derive(Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.lines.lock().unwrap().push(serde_json::to_string(record)?);
        Ok(())
    }
}

/// 環境変数の代わりに固定値を返す
#[derive(Default)]
pub struct StubEnv {
    pub credential: Option<String>,
    pub credential_var: Option<String>,
    pub proxy: Option<String>,
    pub exe_dir: Option<PathBuf>,
    pub current_dir: PathBuf,
}

impl EnvResolver for StubEnv {
    fn credential(&self, var: &str) -> Option<Credential> {
        let expected = self.credential_var.as_deref().unwrap_or("OPENAI_API_KEY");
        if var != expected {
            return None;
        }
        self.credential.as_deref().map(Credential::new)
    }

    fn proxy(&self) -> Option<String> {
        self.proxy.clone()
    }

    fn base_url(&self) -> Option<String> {
        None
    }

    fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
        Err(Error::env("no log file in tests"))
    }

    fn exe_dir(&self) -> Result<PathBuf, Error> {
        self.exe_dir
            .clone()
            .ok_or_else(|| Error::system("no executable path"))
    }

    fn current_dir(&self) -> Result<PathBuf, Error> {
        Ok(self.current_dir.clone())
    }
}

/// ディレクトリ内のファイル一覧（名前順）
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|rd| rd.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default();
    files.sort();
    files
}

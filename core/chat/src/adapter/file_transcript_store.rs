//! 会話記録をテキストファイルへ保存する TranscriptStore 実装
//!
//! ファイル名は chat_record_<YYYYMMDD_HHMMSS>.txt。同名が既にあれば _2, _3, ... を付ける。

use crate::ports::outbound::TranscriptStore;
use chrono::NaiveDateTime;
use common::domain::TranscriptDir;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

const FILE_PREFIX: &str = "chat_record_";
const FILE_EXT: &str = "txt";
const MAX_SUFFIX: u32 = 1000;

/// ディレクトリ直下に会話記録を書く
pub struct FileTranscriptStore {
    fs: Arc<dyn FileSystem>,
    dir: TranscriptDir,
}

impl FileTranscriptStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: TranscriptDir) -> Self {
        Self { fs, dir }
    }

    /// 候補のファイル名（1 番目は接尾辞なし、以降 _2, _3, ...）
    fn candidates(&self, started_at: &NaiveDateTime) -> impl Iterator<Item = PathBuf> + '_ {
        let stem = format!("{}{}", FILE_PREFIX, started_at.format("%Y%m%d_%H%M%S"));
        (1..=MAX_SUFFIX).map(move |n| {
            let name = if n == 1 {
                format!("{}.{}", stem, FILE_EXT)
            } else {
                format!("{}_{}.{}", stem, n, FILE_EXT)
            };
            self.dir.join(name)
        })
    }
}

impl TranscriptStore for FileTranscriptStore {
    /// 候補を順に排他的作成で試す。既存ファイルは上書きしない。
    fn save(&self, started_at: &NaiveDateTime, contents: &str) -> Result<PathBuf, Error> {
        self.fs.create_dir_all(&self.dir)?;
        for path in self.candidates(started_at) {
            if self.fs.write_new(&path, contents)? {
                return Ok(path);
            }
        }
        Err(Error::io_msg(format!(
            "Too many transcripts for {} in '{}'",
            started_at.format("%Y%m%d_%H%M%S"),
            self.dir.display()
        )))
    }
}

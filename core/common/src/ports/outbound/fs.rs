//! ファイルシステム Outbound ポート
//!
//! usecase はこの trait 経由でのみファイル I/O を行う。

use crate::error::Error;
use std::path::Path;

/// ファイルシステム抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdFileSystem` やテスト用の失敗する FS など。
pub trait FileSystem: Send + Sync {
    /// 新規ファイルを作って全内容を書き、閉じる。
    ///
    /// 作成は排他的に行い、既存ファイルは上書きしない（その場合は Ok(false)）。
    fn write_new(&self, path: &Path, contents: &str) -> Result<bool, Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる。
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;
}

//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::Credential;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "roleplay-chat";
const LOG_FILE: &str = "chat.jsonl";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

/// 空文字・空白のみは未設定とみなして環境変数を読む
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// ログファイルパスを解決する（環境変数の参照元を差し替えられるよう関数に分ける）
fn log_file_path_from(get: impl Fn(&str) -> Option<String>) -> Result<PathBuf, Error> {
    if let Some(p) = get("CHAT_LOG_FILE") {
        return Ok(PathBuf::from(p));
    }
    let state_base = get("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| get("HOME").map(|h| PathBuf::from(h).join(".local").join("state")))
        .ok_or_else(|| Error::env("HOME is not set"))?;
    Ok(state_base.join(APP_DIR).join(LOG_FILE))
}

impl EnvResolver for StdEnvResolver {
    fn credential(&self, var: &str) -> Option<Credential> {
        non_empty_var(var).map(|s| Credential::new(s.trim()))
    }

    fn proxy(&self) -> Option<String> {
        non_empty_var("CHAT_PROXY")
    }

    fn base_url(&self) -> Option<String> {
        non_empty_var("OPENAI_BASE_URL")
    }

    fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
        log_file_path_from(non_empty_var)
    }

    fn exe_dir(&self) -> Result<PathBuf, Error> {
        let exe = env::current_exe()
            .map_err(|e| Error::env(format!("Failed to locate the executable: {}", e)))?;
        exe.parent()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| Error::env("Executable has no parent directory"))
    }

    fn current_dir(&self) -> Result<PathBuf, Error> {
        env::current_dir().map_err(|e| Error::env(format!("Failed to get current directory: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_log_file_path_explicit() {
        let p = log_file_path_from(lookup(&[("CHAT_LOG_FILE", "/tmp/x.jsonl"), ("HOME", "/home/u")]))
            .unwrap();
        assert_eq!(p, PathBuf::from("/tmp/x.jsonl"));
    }

    #[test]
    fn test_log_file_path_xdg_state_home() {
        let p = log_file_path_from(lookup(&[("XDG_STATE_HOME", "/state"), ("HOME", "/home/u")]))
            .unwrap();
        assert_eq!(p, PathBuf::from("/state/roleplay-chat/chat.jsonl"));
    }

    #[test]
    fn test_log_file_path_home_fallback() {
        let p = log_file_path_from(lookup(&[("HOME", "/home/u")])).unwrap();
        assert_eq!(p, PathBuf::from("/home/u/.local/state/roleplay-chat/chat.jsonl"));
    }

    #[test]
    fn test_log_file_path_without_home_fails() {
        assert!(log_file_path_from(lookup(&[])).is_err());
    }

    #[test]
    fn test_exe_dir_exists() {
        let dir = StdEnvResolver.exe_dir().unwrap();
        assert!(dir.is_dir());
    }
}

//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（端末入出力・会話記録の保存）を使うための trait

pub mod inbound;
pub mod outbound;

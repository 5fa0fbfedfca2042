/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる任意の動的設定
///
/// # 使用例
///
/// ```rust
/// use crate::config::{APP_CONFIG, UserConfig};
///
/// // AppConfig: グローバル定数として直接参照
/// let program = APP_CONFIG.tool.program;
///
/// // UserConfig: load時に自動検証
/// let user_config = UserConfig::load()?;
/// let program = user_config.program.as_deref().unwrap_or(program);
/// ```
pub mod app;
pub mod error;
pub mod user;

pub use app::APP_CONFIG;
pub use user::UserConfig;

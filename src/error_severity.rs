//! プレゼンテーション層が使用するエラー深刻度
//!
//! このモジュールはアーキテクチャの最外層（プレゼンテーション層）に属し、
//! 終了コードの決定に使用される。
//!
//! **依存方向の原則:**
//! - 内側層（domain, runner, config）はこのモジュールに依存してOK
//! - このモジュールは他のモジュールに依存しない（独立）

use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// アップロード処理の失敗
    ///
    /// データディレクトリの欠落・空、ツール未インストール、ツールの異常終了など。
    /// Uploader が報告する失敗はすべてこれに該当する。
    ///
    /// **Exit Code: 1**
    UploadFailure,

    /// 設定エラー
    ///
    /// config.toml が壊れている、値が不正など。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// システムエラー
    ///
    /// 設定ファイルが読めないなど、ユーザーが直せない外部要因。
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UploadFailure => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UploadFailure => write!(f, "upload failure"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}

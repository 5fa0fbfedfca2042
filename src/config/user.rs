/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\fsupload\config.toml
/// macOS:   /Users/<User>/Library/Application Support/fsupload/config.toml
/// Linux:   /home/<user>/.config/fsupload/config.toml
///
/// 設定ファイルは任意です。存在しない場合はデフォルト値を使用し、ファイルは作成しません。
use crate::config::app::APP_CONFIG;
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// ユーザー設定
///
/// すべてのキーは省略可能。省略されたキーは APP_CONFIG の値にフォールバックする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    /// ビルドツールの実行ファイル（例: "/opt/platformio/bin/pio"）
    pub program: Option<String>,

    /// `--environment` に渡す PlatformIO の環境名
    pub environment: Option<String>,

    /// データディレクトリ名（プロジェクトルートからの相対パス）
    pub data_dir: Option<String>,

    /// アップロード済みファイル一覧をソートして表示するか
    pub sort_files: bool,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| {
                config_dir
                    .join(APP_CONFIG.user.dir_name)
                    .join(APP_CONFIG.user.file_name)
            })
    }

    /// ユーザー設定を読み込む
    ///
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定したパスからユーザー設定を読み込む
    ///
    /// ファイルが存在しない場合はデフォルト設定を返します。
    ///
    /// # Errors
    /// 読み込み、パース、または検証に失敗した場合に ConfigError を返します。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            tracing::debug!("No user config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        tracing::debug!("Loaded user config from {}", config_path.display());
        Ok(config)
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - program / environment / data_dir: 指定されている場合は空文字列でないこと
    /// - data_dir: 相対パスであること
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_non_empty(self.program.as_deref(), "program")?;
        Self::validate_non_empty(self.environment.as_deref(), "environment")?;
        Self::validate_non_empty(self.data_dir.as_deref(), "data_dir")?;

        if let Some(data_dir) = &self.data_dir
            && Path::new(data_dir).is_absolute()
        {
            return Err(ConfigError::validation_error(format!(
                "data_dir '{}' must be relative to the project root",
                data_dir
            )));
        }

        Ok(())
    }

    fn validate_non_empty(value: Option<&str>, field_name: &str) -> Result<(), ConfigError> {
        match value {
            Some(v) if v.trim().is_empty() => Err(ConfigError::validation_error(format!(
                "'{}' cannot be empty. Remove the key to use the default.",
                field_name
            ))),
            _ => Ok(()),
        }
    }
}

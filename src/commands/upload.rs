use crate::config::{APP_CONFIG, UserConfig};
use crate::presentation::output::{OutputMode, Reporter};
use crate::runner::ProcessRunner;
use crate::uploader::{UploadSettings, Uploader};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// upload コマンドのCLIオプション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// プロジェクトルート（省略時はカレントディレクトリ）
    pub project_dir: Option<PathBuf>,
    /// PlatformIO の環境名（ユーザー設定より優先）
    pub environment: Option<String>,
    /// ファイル一覧をソートする
    pub sort: bool,
}

/// アップロードコマンドを実行する
///
/// # 戻り値
/// アップロードの成否。Uploader の失敗は表示済みで `Ok(false)` になる。
///
/// # エラー
/// 設定の読み込みやプロジェクトルートの解決に失敗した場合のみ
/// anyhow::Result のエラーとして返す。
pub async fn execute(options: &UploadOptions, mode: OutputMode) -> Result<bool> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    let project_root = resolve_project_root(options.project_dir.as_deref())?;
    let settings = build_settings(&user_config, options);
    tracing::debug!("Upload settings: {:?}", settings);

    let out: Box<dyn Write> = match mode {
        OutputMode::Human => Box::new(io::stderr()),
        OutputMode::Machine => Box::new(io::stdout()),
    };
    let mut reporter = Reporter::new(out, mode);

    let uploader = Uploader::new(project_root, settings, ProcessRunner::new());
    Ok(uploader.run(&mut reporter).await)
}

/// プロジェクトルートを絶対パスに解決する
fn resolve_project_root(project_dir: Option<&Path>) -> Result<PathBuf> {
    match project_dir {
        Some(dir) => std::path::absolute(dir)
            .with_context(|| format!("Failed to resolve project directory '{}'", dir.display())),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}

/// APP_CONFIG → UserConfig → CLI フラグ の順に上書きして設定を組み立てる
pub fn build_settings(user_config: &UserConfig, options: &UploadOptions) -> UploadSettings {
    let mut settings = UploadSettings::default();

    if let Some(program) = &user_config.program {
        settings.program = program.clone();
    }
    if let Some(data_dir) = &user_config.data_dir {
        settings.data_dir_name = data_dir.clone();
    }

    let environment = options
        .environment
        .as_ref()
        .or(user_config.environment.as_ref());
    if let Some(environment) = environment {
        settings.args.push(APP_CONFIG.tool.environment_flag.to_string());
        settings.args.push(environment.clone());
    }

    settings.sort_files = options.sort || user_config.sort_files;
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_uploadfs() {
        let settings = build_settings(&UserConfig::default(), &UploadOptions::default());
        assert_eq!(settings.command_line(), "pio run --target uploadfs");
        assert_eq!(settings.data_dir_name, "data");
        assert!(!settings.sort_files);
    }

    #[test]
    fn test_user_config_overrides() {
        let user_config = UserConfig {
            program: Some("/opt/pio/bin/pio".to_string()),
            environment: Some("esp32dev".to_string()),
            data_dir: Some("www".to_string()),
            sort_files: true,
        };
        let settings = build_settings(&user_config, &UploadOptions::default());
        assert_eq!(
            settings.command_line(),
            "/opt/pio/bin/pio run --target uploadfs --environment esp32dev"
        );
        assert_eq!(settings.data_dir_name, "www");
        assert!(settings.sort_files);
    }

    #[test]
    fn test_cli_environment_wins_over_config() {
        let user_config = UserConfig {
            environment: Some("esp32dev".to_string()),
            ..Default::default()
        };
        let options = UploadOptions {
            environment: Some("esp32-s3".to_string()),
            sort: true,
            ..Default::default()
        };
        let settings = build_settings(&user_config, &options);
        assert_eq!(
            settings.args,
            vec!["run", "--target", "uploadfs", "--environment", "esp32-s3"]
        );
        assert!(settings.sort_files);
    }

    #[test]
    fn test_resolve_project_root_is_absolute() {
        let root = resolve_project_root(Some(Path::new("firmware"))).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("firmware"));

        let cwd = resolve_project_root(None).unwrap();
        assert!(cwd.is_absolute());
    }
}

/// プレゼンテーション層: アップロード結果の出力
///
/// 進捗・成功・失敗をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::UploadResult;
use crate::domain::error::UploadError;
use crate::domain::progress::UploadPhase;
use std::io::{self, Write};

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "fsupload
Upload the project's data directory to the device filesystem via PlatformIO

Usage:
  fsupload [--machine] [--verbose] [command] [options]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
  --verbose        - Show debug logs on stderr (overridden by RUST_LOG)

Available commands:
  upload           - Run `pio run --target uploadfs` (default command)
    --project-dir <dir>  Project root containing the data directory (default: .)
    --env <name>         PlatformIO environment to upload to
    --sort               Sort the list of uploaded files
  help             - Display this help message

Configuration:
  Optional config.toml in the user config directory (e.g. ~/.config/fsupload/):
    program = \"pio\"          # build tool executable
    environment = \"esp32dev\" # default PlatformIO environment
    data_dir = \"data\"        # data directory, relative to the project root
    sort_files = false";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// 出力モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// 人間向けの詳細メッセージ
    Human,
    /// 1行1オブジェクトの JSON
    Machine,
}

impl OutputMode {
    pub fn from_flag(machine_output: bool) -> Self {
        if machine_output {
            Self::Machine
        } else {
            Self::Human
        }
    }
}

/// Uploader の報告先
///
/// 書き込み失敗はアップロード結果を変えないため、警告ログに留める。
pub struct Reporter<W: Write> {
    out: W,
    mode: OutputMode,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self { out, mode }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// 進捗イベントを出力
    pub fn progress(&mut self, phase: &UploadPhase) {
        let result = match self.mode {
            OutputMode::Human => write_progress_human(&mut self.out, phase),
            OutputMode::Machine => serde_json::to_value(phase)
                .map_err(io::Error::from)
                .and_then(|value| write_json_line(&mut self.out, &value)),
        };
        log_write_error(result);
    }

    /// 成功結果を出力
    pub fn success(&mut self, result: &UploadResult) {
        let written = match self.mode {
            OutputMode::Human => write_success_human(&mut self.out, result),
            OutputMode::Machine => write_json_line(
                &mut self.out,
                &serde_json::json!({
                    "success": true,
                    "command": "upload",
                    "data_dir": result.data_dir,
                    "program": result.program,
                    "files": result.files,
                    "file_count": result.files.len(),
                    "elapsed_ms": result.elapsed_ms,
                    "finished_at": result.finished_at
                }),
            ),
        };
        log_write_error(written);
    }

    /// 失敗を出力
    pub fn failure(&mut self, error: &UploadError) {
        let written = match self.mode {
            OutputMode::Human => write_failure_human(&mut self.out, error),
            OutputMode::Machine => {
                let stderr = match error {
                    UploadError::ToolExecutionFailed { stderr, .. } => Some(stderr.as_str()),
                    _ => None,
                };
                write_json_line(
                    &mut self.out,
                    &serde_json::json!({
                        "success": false,
                        "command": "upload",
                        "error": {
                            "kind": error.kind(),
                            "message": error.to_string(),
                            "hint": error.hint(),
                            "exit_code": error.severity().exit_code()
                        },
                        "stderr": stderr
                    }),
                )
            }
        };
        log_write_error(written);
    }
}

fn log_write_error(result: io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to write output: {}", e);
    }
}

fn write_json_line<W: Write>(out: &mut W, value: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

fn write_progress_human<W: Write>(out: &mut W, phase: &UploadPhase) -> io::Result<()> {
    match phase {
        UploadPhase::Starting { data_dir } => {
            writeln!(out, "Uploading data directory to device filesystem...")?;
            writeln!(out, "Data directory: {}", data_dir)?;
        }
        UploadPhase::InvokingTool { command_line, .. } => {
            writeln!(out, "Running: {}", command_line)?;
        }
        UploadPhase::ToolFinished { exit_code, elapsed_ms } => {
            tracing::debug!("Tool finished with {:?} after {}ms", exit_code, elapsed_ms);
        }
    }
    out.flush()
}

fn write_success_human<W: Write>(out: &mut W, result: &UploadResult) -> io::Result<()> {
    writeln!(out, "✓ {}", result.success_message())?;
    writeln!(out, "Files uploaded:")?;
    for file in &result.files {
        writeln!(out, "  - {}", file)?;
    }
    out.flush()
}

fn write_failure_human<W: Write>(out: &mut W, error: &UploadError) -> io::Result<()> {
    match error {
        UploadError::ToolExecutionFailed { stderr, .. } => {
            writeln!(out, "✗ Failed to upload data to device filesystem! ({})", error)?;
            writeln!(out, "Error output:")?;
            write!(out, "{}", stderr)?;
            if !stderr.ends_with('\n') {
                writeln!(out)?;
            }
        }
        _ if error.is_warning() => writeln!(out, "Warning: {}", error)?,
        _ => writeln!(out, "Error: {}", error)?,
    }

    if let Some(hint) = error.hint() {
        writeln!(out, "\nHint: {}", hint)?;
    }
    out.flush()
}

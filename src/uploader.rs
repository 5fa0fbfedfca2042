/// アプリケーションサービス: Uploader
///
/// データディレクトリの検証、ビルドツールの起動、結果の報告までの
/// 1回分のアップロードを調停する。
use crate::commands::result::UploadResult;
use crate::config::APP_CONFIG;
use crate::domain::error::UploadError;
use crate::domain::progress::UploadPhase;
use crate::domain::{listing, validator};
use crate::presentation::output::Reporter;
use crate::runner::CommandRunner;
use chrono::{SecondsFormat, Utc};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Uploader の実行設定
///
/// APP_CONFIG を基に、ユーザー設定と CLI フラグで上書きされた値を保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub program: String,
    pub args: Vec<String>,
    pub data_dir_name: String,
    pub sort_files: bool,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            program: APP_CONFIG.tool.program.to_string(),
            args: APP_CONFIG
                .tool
                .run_args
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
            data_dir_name: APP_CONFIG.upload.data_dir_name.to_string(),
            sort_files: false,
        }
    }
}

impl UploadSettings {
    /// 表示用のコマンドライン
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct Uploader<R> {
    project_root: PathBuf,
    settings: UploadSettings,
    runner: R,
}

impl<R: CommandRunner> Uploader<R> {
    pub fn new(project_root: impl Into<PathBuf>, settings: UploadSettings, runner: R) -> Self {
        Self {
            project_root: project_root.into(),
            settings,
            runner,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.project_root.join(&self.settings.data_dir_name)
    }

    /// 1回分のアップロードを実行し、結果を報告する
    ///
    /// すべての失敗はここで表示に変換され、`false` として返る。
    pub async fn run<W: Write>(&self, reporter: &mut Reporter<W>) -> bool {
        let result = self.upload(|phase| reporter.progress(phase)).await;

        match result {
            Ok(report) => {
                reporter.success(&report);
                true
            }
            Err(err) => {
                tracing::debug!("Upload failed: {:?}", err);
                reporter.failure(&err);
                false
            }
        }
    }

    /// 検証 → ツール起動 → 一覧作成 を行う
    ///
    /// 検証に失敗した場合、ツールは起動しない。
    pub async fn upload(
        &self,
        mut on_progress: impl FnMut(&UploadPhase),
    ) -> Result<UploadResult, UploadError> {
        let data_dir = validator::validate_data_dir(&self.data_dir())?;
        let data_dir_display = data_dir.path.display().to_string();

        on_progress(&UploadPhase::Starting {
            data_dir: data_dir_display.clone(),
        });
        on_progress(&UploadPhase::InvokingTool {
            command_line: self.settings.command_line(),
            working_dir: self.project_root.display().to_string(),
        });

        let started = Instant::now();
        let outcome = self
            .runner
            .execute(&self.settings.program, &self.settings.args, &self.project_root)
            .await?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        on_progress(&UploadPhase::ToolFinished {
            exit_code: outcome.status,
            elapsed_ms,
        });

        if !outcome.success() {
            return Err(UploadError::ToolExecutionFailed {
                exit_code: outcome.status,
                stderr: outcome.stderr,
            });
        }

        let files = listing::list_relative_files(&data_dir.path, self.settings.sort_files);

        Ok(UploadResult {
            data_dir: data_dir_display,
            program: self.settings.program.clone(),
            files,
            elapsed_ms,
            finished_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::output::OutputMode;
    use crate::runner::{ExitOutcome, RunnerError};
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// 呼び出しを記録し、決められた結果を返す偽の CommandRunner
    enum FakeBehavior {
        Exit(ExitOutcome),
        NotFound,
    }

    struct FakeRunner {
        behavior: FakeBehavior,
        calls: RefCell<Vec<(String, Vec<String>, PathBuf)>>,
    }

    impl FakeRunner {
        fn exiting(status: i32, stderr: &str) -> Self {
            Self {
                behavior: FakeBehavior::Exit(ExitOutcome {
                    status: Some(status),
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn not_found() -> Self {
            Self {
                behavior: FakeBehavior::NotFound,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl CommandRunner for &FakeRunner {
        async fn execute(
            &self,
            program: &str,
            args: &[String],
            working_dir: &Path,
        ) -> Result<ExitOutcome, RunnerError> {
            self.calls.borrow_mut().push((
                program.to_string(),
                args.to_vec(),
                working_dir.to_path_buf(),
            ));
            match &self.behavior {
                FakeBehavior::Exit(outcome) => Ok(outcome.clone()),
                FakeBehavior::NotFound => Err(RunnerError::ToolNotFound {
                    program: program.to_string(),
                }),
            }
        }
    }

    fn project_with_files() -> TempDir {
        let root = TempDir::new().unwrap();
        let data = root.path().join("data");
        fs::create_dir_all(data.join("css")).unwrap();
        fs::write(data.join("index.html"), "<html>").unwrap();
        fs::write(data.join("css").join("style.css"), "body {}").unwrap();
        root
    }

    async fn run_human(uploader: &Uploader<&FakeRunner>) -> (bool, String) {
        let mut reporter = Reporter::new(Vec::new(), OutputMode::Human);
        let ok = uploader.run(&mut reporter).await;
        (ok, String::from_utf8(reporter.into_inner()).unwrap())
    }

    fn listed_files(output: &str) -> BTreeSet<String> {
        output
            .lines()
            .filter_map(|line| line.strip_prefix("  - "))
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_missing_data_directory_skips_tool() {
        let root = TempDir::new().unwrap();
        let runner = FakeRunner::exiting(0, "");
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        let (ok, output) = run_human(&uploader).await;

        assert!(!ok);
        assert!(output.contains(&uploader.data_dir().display().to_string()));
        assert!(output.contains("not found"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_data_directory_warns_and_skips_tool() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("data")).unwrap();
        let runner = FakeRunner::exiting(0, "");
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        let (ok, output) = run_human(&uploader).await;

        assert!(!ok);
        assert!(output.contains("Warning:"));
        assert!(output.contains("is empty"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_lists_every_file() {
        let root = project_with_files();
        let runner = FakeRunner::exiting(0, "");
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        let (ok, output) = run_human(&uploader).await;

        assert!(ok);
        assert!(output.contains("✓"));
        let expected: BTreeSet<String> = [
            "index.html".to_string(),
            Path::new("css").join("style.css").display().to_string(),
        ]
        .into_iter()
        .collect();
        assert_eq!(listed_files(&output), expected);
    }

    #[tokio::test]
    async fn test_invokes_uploadfs_target_in_project_root() {
        let root = project_with_files();
        let runner = FakeRunner::exiting(0, "");
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        uploader.upload(|_| {}).await.expect("upload should succeed");

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (program, args, working_dir) = &calls[0];
        assert_eq!(program, "pio");
        assert_eq!(args, &["run", "--target", "uploadfs"]);
        assert_eq!(working_dir, root.path());
    }

    #[tokio::test]
    async fn test_tool_failure_prints_stderr_verbatim() {
        let root = project_with_files();
        let runner = FakeRunner::exiting(1, "Error: Please specify `upload_port`");
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        let (ok, output) = run_human(&uploader).await;

        assert!(!ok);
        assert!(output.contains("✗"));
        assert!(output.contains("Error: Please specify `upload_port`"));
        assert!(listed_files(&output).is_empty());
    }

    #[tokio::test]
    async fn test_tool_not_found_is_reported() {
        let root = project_with_files();
        let runner = FakeRunner::not_found();
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        let (ok, output) = run_human(&uploader).await;

        assert!(!ok);
        assert!(output.contains("not found. Please install PlatformIO or add it to PATH."));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let root = project_with_files();
        let runner = FakeRunner::exiting(0, "");
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        let (first_ok, first) = run_human(&uploader).await;
        let (second_ok, second) = run_human(&uploader).await;

        assert!(first_ok && second_ok);
        assert_eq!(listed_files(&first), listed_files(&second));
        assert_eq!(runner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_progress_phases_in_order() {
        let root = project_with_files();
        let runner = FakeRunner::exiting(0, "");
        let uploader = Uploader::new(root.path(), UploadSettings::default(), &runner);

        let mut phases = Vec::new();
        uploader
            .upload(|phase| phases.push(phase.clone()))
            .await
            .unwrap();

        assert_eq!(phases.len(), 3);
        assert!(matches!(phases[0], UploadPhase::Starting { .. }));
        assert!(matches!(
            &phases[1],
            UploadPhase::InvokingTool { command_line, .. } if command_line == "pio run --target uploadfs"
        ));
        assert!(matches!(
            phases[2],
            UploadPhase::ToolFinished {
                exit_code: Some(0),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_custom_data_dir_name_and_sorted_listing() {
        let root = TempDir::new().unwrap();
        let web = root.path().join("web");
        fs::create_dir(&web).unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(web.join(name), name).unwrap();
        }
        let settings = UploadSettings {
            data_dir_name: "web".to_string(),
            sort_files: true,
            ..UploadSettings::default()
        };
        let runner = FakeRunner::exiting(0, "");
        let uploader = Uploader::new(root.path(), settings, &runner);

        let result = uploader.upload(|_| {}).await.unwrap();

        assert_eq!(result.files, vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(result.data_dir, web.display().to_string());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_real_process_failure_end_to_end() {
        use crate::runner::ProcessRunner;

        let root = project_with_files();
        let settings = UploadSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo 'flash write failed' >&2; exit 1".to_string()],
            ..UploadSettings::default()
        };
        let uploader = Uploader::new(root.path(), settings, ProcessRunner::new());

        let mut reporter = Reporter::new(Vec::new(), OutputMode::Human);
        let ok = uploader.run(&mut reporter).await;
        let output = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(!ok);
        assert!(output.contains("flash write failed"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_real_missing_tool_end_to_end() {
        use crate::runner::ProcessRunner;

        let root = project_with_files();
        let settings = UploadSettings {
            program: "fsupload-no-such-tool-7f3a".to_string(),
            ..UploadSettings::default()
        };
        let uploader = Uploader::new(root.path(), settings, ProcessRunner::new());

        let mut reporter = Reporter::new(Vec::new(), OutputMode::Human);
        let ok = uploader.run(&mut reporter).await;
        let output = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(!ok);
        assert!(output.contains("fsupload-no-such-tool-7f3a"));
        assert!(output.contains("not found"));
    }
}

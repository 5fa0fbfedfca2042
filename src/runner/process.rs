use crate::runner::{CommandRunner, ExitOutcome, RunnerError};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// 実際にサブプロセスを起動する CommandRunner
///
/// 出力はストリーミングせず、終了後にまとめて回収する。
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<ExitOutcome, RunnerError> {
        tracing::debug!(
            "Running command: {} {} (cwd: {})",
            program,
            args.join(" "),
            working_dir.display()
        );

        // 待機中の Future が破棄された場合は子プロセスも終了させる
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RunnerError::from_spawn(program, working_dir.is_dir(), e))?;

        let outcome = ExitOutcome {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        for line in outcome.stdout.lines() {
            tracing::debug!(target: "tool_output", program = %program, "{}", line);
        }

        Ok(outcome)
    }
}

/// インフラ層: 外部コマンド実行
///
/// ビルドツールのサブプロセス起動を `CommandRunner` として抽象化します。
/// 本番では `ProcessRunner` を使用し、テストでは偽の実装に差し替えます。
pub mod error;
pub mod process;

pub use error::RunnerError;
pub use process::ProcessRunner;

use std::path::Path;

/// 外部プロセスの終了結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitOutcome {
    /// 終了コード（シグナルで終了した場合は None）
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExitOutcome {
    /// 終了コード 0 で終了したか
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// 外部コマンドを実行する能力
///
/// 完了まで待機し、終了コードと両方の出力ストリームを返す。
/// タイムアウトは設けない。
pub trait CommandRunner {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<ExitOutcome, RunnerError>;
}

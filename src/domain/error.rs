/// ドメイン層のエラー定義
///
/// アップロード処理の失敗を構造化して定義。
/// インフラ層の RunnerError は From で変換され、呼び出し元に io::Error を漏らさない。
use crate::error_severity::ErrorSeverity;
use crate::runner::RunnerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    /// データディレクトリが存在しない
    #[error("data directory '{path}' not found")]
    MissingDataDirectory { path: String },

    /// パスは存在するがディレクトリではない
    #[error("data directory '{path}' is not a directory")]
    NotADirectory { path: String },

    /// データディレクトリが空
    #[error("data directory '{path}' is empty")]
    EmptyDataDirectory { path: String },

    /// ビルドツールが見つからない
    #[error("build tool '{program}' not found. Please install PlatformIO or add it to PATH.")]
    ToolNotFound { program: String },

    /// ビルドツールが非ゼロで終了した
    #[error("upload tool failed ({})", describe_status(.exit_code))]
    ToolExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// その他の予期しないエラー
    #[error("{message}")]
    Unexpected { message: String },
}

fn describe_status(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl UploadError {
    pub fn missing_data_directory(path: impl Into<String>) -> Self {
        Self::MissingDataDirectory { path: path.into() }
    }

    pub fn empty_data_directory(path: impl Into<String>) -> Self {
        Self::EmptyDataDirectory { path: path.into() }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// 機械可読出力用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingDataDirectory { .. } => "missing_data_directory",
            Self::NotADirectory { .. } => "not_a_directory",
            Self::EmptyDataDirectory { .. } => "empty_data_directory",
            Self::ToolNotFound { .. } => "tool_not_found",
            Self::ToolExecutionFailed { .. } => "tool_execution_failed",
            Self::Unexpected { .. } => "unexpected_error",
        }
    }

    /// エラーではなく警告として表示するか
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyDataDirectory { .. })
    }

    /// エラーの深刻度を返す
    ///
    /// Uploader の失敗はすべて終了コード 1 に対応する
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UploadFailure
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::MissingDataDirectory { .. } => {
                Some("Create the data directory in the project root, or pass --project-dir.")
            }
            Self::NotADirectory { .. } => Some("Remove the file or point data_dir at a directory."),
            Self::EmptyDataDirectory { .. } => {
                Some("Add the files to upload to the data directory first.")
            }
            Self::ToolNotFound { .. } => {
                Some("Install PlatformIO or add it to PATH, or set 'program' in config.toml.")
            }
            Self::ToolExecutionFailed { .. } => {
                Some("Check the device connection and the error output above.")
            }
            Self::Unexpected { .. } => None,
        }
    }
}

impl From<RunnerError> for UploadError {
    fn from(err: RunnerError) -> Self {
        match err {
            RunnerError::ToolNotFound { program } => Self::ToolNotFound { program },
            other @ RunnerError::Io { .. } => Self::unexpected(other.to_string()),
        }
    }
}

/// インフラ層（外部プロセス実行）のエラー定義
///
/// 外部ツールの起動・通信で発生するエラーを表現する。
/// 発信元の std::io::Error を保持し、ドメイン層で UploadError に変換される。
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    /// 実行ファイルが PATH 上に見つからない
    #[error("executable '{program}' not found")]
    ToolNotFound { program: String },

    /// 起動または出力の回収に失敗
    #[error("failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl RunnerError {
    /// 起動時の io::Error を分類する
    ///
    /// NotFound は作業ディレクトリが存在する場合に限り実行ファイル不在とみなす。
    pub fn from_spawn(program: &str, working_dir_exists: bool, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound && working_dir_exists {
            Self::ToolNotFound {
                program: program.to_string(),
            }
        } else {
            Self::Io {
                program: program.to_string(),
                source,
            }
        }
    }
}

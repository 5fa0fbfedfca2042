/// ドメインサービス: データディレクトリのバリデーション
///
/// アップロード前にデータディレクトリを検証する。
/// 存在確認 → ディレクトリ確認 → 空チェックの順に評価し、最初の失敗で打ち切る。
use crate::domain::error::UploadError;
use std::fs;
use std::path::{Path, PathBuf};

/// 検証済みのデータディレクトリ
#[derive(Debug, Clone)]
pub struct DataDirectory {
    pub path: PathBuf,
}

/// データディレクトリをバリデーションする
///
/// # エラー
/// - ディレクトリが存在しない
/// - パスがファイルを指している
/// - ディレクトリが空（ファイルもサブディレクトリもない）
pub fn validate_data_dir(path: &Path) -> Result<DataDirectory, UploadError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(UploadError::missing_data_directory(display));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        UploadError::unexpected(format!("failed to read metadata of '{}': {}", display, e))
    })?;

    if !metadata.is_dir() {
        return Err(UploadError::NotADirectory { path: display });
    }

    let mut entries = fs::read_dir(path).map_err(|e| {
        UploadError::unexpected(format!("failed to read data directory '{}': {}", display, e))
    })?;

    if entries.next().is_none() {
        return Err(UploadError::empty_data_directory(display));
    }

    Ok(DataDirectory {
        path: path.to_path_buf(),
    })
}

/// コマンド実行結果を表す型
///
/// Uploader は成功時にこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use serde::Serialize;

/// アップロードコマンドの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    /// データディレクトリの絶対パス
    pub data_dir: String,
    /// 実行したビルドツール
    pub program: String,
    /// アップロードされたファイル（データディレクトリ基準の相対パス）
    pub files: Vec<String>,
    /// ツールの実行時間（ミリ秒）
    pub elapsed_ms: u64,
    /// 完了時刻（RFC 3339, UTC）
    pub finished_at: String,
}

impl UploadResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> &'static str {
        "Successfully uploaded data to device filesystem!"
    }
}

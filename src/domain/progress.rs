use serde::Serialize;
/// ドメイン層: アップロード進捗イベント定義
///
/// アップロード処理の各段階をイベントとして表現します。
/// プレゼンテーション層はこれらのイベントを受け取り、
/// 人間向けの進捗表示や機械向けの JSON 出力に使用します。

/// アップロード処理の各段階を表すイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum UploadPhase {
    /// 検証完了、アップロード開始
    Starting { data_dir: String },

    /// ビルドツール起動直前
    InvokingTool {
        command_line: String,
        working_dir: String,
    },

    /// ビルドツール終了
    ToolFinished {
        exit_code: Option<i32>,
        elapsed_ms: u64,
    },
}

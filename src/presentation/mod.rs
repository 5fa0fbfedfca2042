/// プレゼンテーション層モジュール
///
/// ドメイン層のイベント・結果とUI表示の橋渡しを行います。
/// プレゼンテーション層はドメイン層に依存しますが、その逆はありません。
///
/// # モジュール
/// - `output`: 進捗・結果の出力（人間向け・機械向け）
pub mod output;

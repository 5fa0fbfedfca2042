use crate::presentation::output::{self, OutputMode};

/// ヘルプコマンドを実行
pub fn execute(mode: OutputMode) {
    match mode {
        OutputMode::Human => output::print_usage(),
        OutputMode::Machine => println!(
            "{}",
            serde_json::json!({
                "success": true,
                "command": "help"
            })
        ),
    }
}

mod cli;
mod commands;
mod config;
mod domain;
mod error_severity;
mod presentation;
mod runner;
mod uploader;

use anyhow::Result;
use cli::GlobalFlags;
use config::error::ConfigError;
use error_severity::ErrorSeverity;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let flags = GlobalFlags::scan(&args);

    init_tracing(flags.verbose);

    match run(&args, flags).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(ErrorSeverity::UploadFailure.exit_code()),
        Err(e) => handle_error(e, flags.machine_output),
    }
}

/// アプリケーションのメイン処理
async fn run(args: &[String], flags: GlobalFlags) -> Result<bool> {
    let command = cli::parse_args(args)?;
    cli::dispatch(command, flags).await
}

/// ログ出力の初期化
///
/// RUST_LOG が設定されていればそれを優先する。ログは常に stderr に出力する。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) -> ! {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
        println!(
            "{}",
            serde_json::json!({
                "success": false,
                "error": {
                    "message": error.to_string(),
                    "causes": causes,
                    "hint": hint,
                    "exit_code": exit_code
                }
            })
        );
    } else {
        eprintln!("Error: {}", error);

        // エラーチェーンを辿って詳細を表示
        let chain: Vec<_> = error.chain().skip(1).collect();
        if !chain.is_empty() {
            eprintln!("\nCaused by:");
            for (i, cause) in chain.iter().enumerate() {
                eprintln!("  {}: {}", i + 1, cause);
            }
        }

        if let Some(hint) = &hint {
            eprintln!("\nHint: {}", hint);
        }
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // CLI引数の誤りなど、分類されないエラー
    ErrorSeverity::UploadFailure.exit_code()
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.hint().map(str::to_string);
        }
    }

    None
}

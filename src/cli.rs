use crate::commands;
use crate::commands::upload::UploadOptions;
use crate::presentation::output::OutputMode;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// コマンドライン全体のどこに置いてもよいフラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    pub machine_output: bool,
    pub verbose: bool,
}

impl GlobalFlags {
    const MACHINE: &'static str = "--machine";
    const VERBOSE: &'static str = "--verbose";

    /// 引数を走査してグローバルフラグを検出する
    ///
    /// 引数の解析に失敗した場合でもエラー出力形式を決められるよう、解析とは独立している。
    pub fn scan(args: &[String]) -> Self {
        Self {
            machine_output: args.iter().skip(1).any(|a| a == Self::MACHINE),
            verbose: args.iter().skip(1).any(|a| a == Self::VERBOSE),
        }
    }

    fn is_global(arg: &str) -> bool {
        arg == Self::MACHINE || arg == Self::VERBOSE
    }
}

/// 解析済みのサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(UploadOptions),
    Help,
}

/// CLI引数を解析する
///
/// コマンドを省略した場合は upload として扱う。
pub fn parse_args(args: &[String]) -> Result<Command> {
    let rest: Vec<&str> = args
        .iter()
        .skip(1)
        .map(String::as_str)
        .filter(|a| !GlobalFlags::is_global(a))
        .collect();

    match rest.split_first() {
        None => Ok(Command::Upload(UploadOptions::default())),
        Some((&"upload", options)) => Ok(Command::Upload(parse_upload_options(options)?)),
        Some((&("help" | "--help" | "-h"), _)) => Ok(Command::Help),
        Some((first, _)) if first.starts_with('-') => {
            Ok(Command::Upload(parse_upload_options(&rest)?))
        }
        Some((command, _)) => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}

fn parse_upload_options(args: &[&str]) -> Result<UploadOptions> {
    let mut options = UploadOptions::default();
    let mut iter = args.iter();

    while let Some(&arg) = iter.next() {
        match arg {
            "--project-dir" => {
                let dir = iter
                    .next()
                    .context("Please specify a directory for --project-dir")?;
                options.project_dir = Some(PathBuf::from(*dir));
            }
            "--env" => {
                let env = iter
                    .next()
                    .context("Please specify an environment name for --env")?;
                options.environment = Some(env.to_string());
            }
            "--sort" => options.sort = true,
            other => bail!(
                "Unknown option for upload: '{}'. Use 'help' to see available options.",
                other
            ),
        }
    }

    Ok(options)
}

/// 解析済みのコマンドを実行する
///
/// # 戻り値
/// コマンドの成否（終了コード 0 / 1 に対応）
pub async fn dispatch(command: Command, flags: GlobalFlags) -> Result<bool> {
    let mode = OutputMode::from_flag(flags.machine_output);

    match command {
        Command::Upload(options) => commands::upload::execute(&options, mode)
            .await
            .context("Upload command failed"),
        Command::Help => {
            commands::help::execute(mode);
            Ok(true)
        }
    }
}

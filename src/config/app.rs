//! アプリケーション設定モジュール
//!
//! コンパイル時定数として定義される静的設定を管理します。
//! これらの設定は実行時には変更できません（上書きは UserConfig と CLI フラグで行う）。

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub tool: ToolConfig,
    pub upload: UploadConfig,
    pub user: UserConfigLocation,
}

/// 外部ビルドツール関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ToolConfig {
    /// 実行ファイル名（PATH から探索される）
    pub program: &'static str,

    /// ファイルシステムアップロードターゲットを実行する引数
    pub run_args: &'static [&'static str],

    /// 環境名を指定するフラグ
    pub environment_flag: &'static str,
}

/// アップロード関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// プロジェクトルートからの相対で解決されるデータディレクトリ名
    pub data_dir_name: &'static str,
}

/// ユーザー設定ファイルの配置
#[derive(Debug, Clone, Copy)]
pub struct UserConfigLocation {
    /// プラットフォームの設定ディレクトリ配下に作るディレクトリ名
    pub dir_name: &'static str,

    /// 設定ファイル名
    pub file_name: &'static str,
}

/// グローバルなアプリケーション設定
pub const APP_CONFIG: AppConfig = AppConfig {
    tool: ToolConfig {
        program: "pio",
        run_args: &["run", "--target", "uploadfs"],
        environment_flag: "--environment",
    },
    upload: UploadConfig {
        data_dir_name: "data",
    },
    user: UserConfigLocation {
        dir_name: "fsupload",
        file_name: "config.toml",
    },
};

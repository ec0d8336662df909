use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pair-annotator")]
#[command(about = "2つのリストをペアにして判定を記録するアノテーションツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アノテーションAPIサーバーを起動
    Serve {
        /// 待ち受けアドレス（例: 127.0.0.1:8000）
        #[arg(short, long)]
        bind: Option<String>,

        /// CORSで許可するフロントエンドのオリジン（複数指定可、設定ファイルより優先）
        #[arg(long = "origin")]
        origins: Vec<String>,
    },

    /// 2つのテキストファイルをペアにして結果ファイルを出力
    Pair {
        /// リスト1（1行1項目）
        #[arg(required = true)]
        list1: PathBuf,

        /// リスト2（1行1項目）
        #[arg(required = true)]
        list2: PathBuf,

        /// 出力ファイル（.xlsxならExcel、それ以外はCSV）
        #[arg(short, long, default_value = "annotation_results.csv")]
        output: PathBuf,
    },

    /// 設定の表示・変更
    Config {
        /// 許可オリジンを追加
        #[arg(long)]
        add_origin: Option<String>,

        /// 待ち受けアドレスを設定
        #[arg(long)]
        set_bind: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

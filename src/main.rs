use clap::Parser;
use pair_annotator::{batch, cli, config, server};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "pair_annotator=debug,tower_http=debug"
    } else {
        "pair_annotator=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { bind, origins } => {
            let mut config = Config::load()?;
            if let Some(bind) = bind {
                config.bind_address = config::parse_bind(&bind)?;
            }
            if !origins.is_empty() {
                config.allowed_origins = origins
                    .iter()
                    .flat_map(|o| config::parse_origins(o))
                    .collect();
            }

            server::serve(&config).await?;
        }

        Commands::Pair { list1, list2, output } => {
            println!("🔗 pair-annotator - ペア作成\n");

            let count = batch::pair_files(&list1, &list2, &output)?;
            println!("✔ {}件のペアを作成", count);
            println!("✔ 結果を保存: {}", output.display());
        }

        Commands::Config { add_origin, set_bind, show } => {
            // 環境変数の上書きを保存しないようファイルだけを読む
            let mut config = Config::load_from(&Config::config_path()?)?;
            let mut changed = false;

            if let Some(origin) = add_origin {
                config.add_origin(&origin);
                changed = true;
            }

            if let Some(bind) = set_bind {
                config.bind_address = config::parse_bind(&bind)?;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  待ち受けアドレス: {}", config.bind_address);
                println!("  許可オリジン: {}", config.allowed_origins.join(", "));
                println!("  最大アップロードサイズ: {} bytes", config.max_upload_bytes);
            }
        }
    }

    Ok(())
}

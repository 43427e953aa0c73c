use clap::Parser;
use stickyboard::cli::{
    handle_add, handle_edit, handle_get, handle_list, handle_rm, handle_serve, Cli, Commands,
};
use stickyboard::config::BoardConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match BoardConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.url {
        config.client.base_url = url;
    }

    let result = match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            handle_serve(&config).await
        }
        Commands::List { json } => handle_list(&config, json).await,
        Commands::Add(args) => handle_add(&config, args).await,
        Commands::Get { id, json } => handle_get(&config, id, json).await,
        Commands::Edit(args) => handle_edit(&config, args).await,
        Commands::Rm { id } => handle_rm(&config, id).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

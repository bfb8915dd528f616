use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use geoabbr::cli::{Cli, Commands};
use geoabbr::config::init_config_from;
use geoabbr::errors::AbbrError;
use geoabbr::runtime::modes::{run_cli, run_server};
use geoabbr::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // generate-config 不需要加载配置和日志
    if let Some(command @ Commands::GenerateConfig { .. }) = cli.command {
        return run_cli(command).await;
    }

    let config = init_config_from(cli.config.as_deref());

    let _guard = init_logging(&config.logging)?;

    match cli.command {
        None | Some(Commands::Serve) => run_server().await,
        Some(command) => {
            if let Err(e) = run_cli(command).await {
                match e.downcast_ref::<AbbrError>() {
                    Some(err) => eprintln!("{}", err.format_colored()),
                    None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
                }
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

mod analyze_cmd;
mod config_cmd;
mod status_cmd;
mod terminal_output;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use aura_config::{config_dir, config_file_path, AuraConfig};
use aura_gateway::{start_server, AnalyzeConfig, GatewayState};
use aura_logging::init_logger;

#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Aura — visual profile analyzer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the analysis server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Upload images to a running server and print the visual profile
    Analyze {
        /// Image files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Base URL of the Aura server
        #[arg(short, long)]
        server: Option<String>,
        /// Write the profile here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Query a running server's health
    Status {
        /// Base URL of the Aura server
        #[arg(short, long)]
        server: Option<String>,
    },
    /// Print the effective configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let path = config_file_path(&config_dir());
    let config = aura_config::load_and_prepare(&path).await?;

    // Client commands report through terminal notes; keep the log console quiet there.
    let level = match cli.command {
        Commands::Serve { .. } => config.logging.level(),
        _ => "warn",
    };
    init_logger(config.logging.dir.as_deref(), level);

    match cli.command {
        Commands::Serve { port, bind } => run_server(config, port, bind).await?,
        Commands::Analyze { files, server, output } => {
            let server = server.unwrap_or_else(|| config.upload.server_url().to_string());
            if !analyze_cmd::run(&config, &files, &server, output.as_deref()).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Status { server } => {
            let server = server.unwrap_or_else(|| config.upload.server_url().to_string());
            status_cmd::run(&server).await?;
        }
        Commands::Config => config_cmd::run(&config, &path)?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_server(mut config: AuraConfig, port: Option<u16>, bind: Option<String>) -> Result<()> {
    if port.is_some() {
        config.server.port = port;
    }
    if bind.is_some() {
        config.server.bind = bind;
    }
    let addr: SocketAddr = config
        .server
        .addr()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.addr()))?;

    let analyze_config = AnalyzeConfig::from_config(&config);
    info!(
        %addr,
        model = %analyze_config.model,
        timeout_secs = analyze_config.timeout.as_secs(),
        "Starting Aura server"
    );

    let state = GatewayState::gemini(analyze_config, config.analysis.api_base_url());
    start_server(addr, state, config.server.body_limit_bytes()).await
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use research_crew::cli::{smoke, ApiClient, ResearchCli};
use research_crew::utils::{init_logger, DEFAULT_FILTER};
use research_crew::{create_router, AppState, Config, ResearchPipeline};

#[derive(Parser)]
#[command(name = "research-crew", version, about = "AI research assistant: search, summarize, verify")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Interactive menu client for a running server
    Cli {
        #[arg(long)]
        base_url: Option<String>,
        /// Seconds to wait for a research report
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
    /// Run the three sample queries against a running server
    Smoke {
        #[arg(long)]
        base_url: Option<String>,
        /// Run even when GEMINI_API_KEY is not set
        #[arg(long)]
        allow_demo: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    match args.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            init_logger(DEFAULT_FILTER);
            serve(config, host, port).await
        }
        Command::Cli { base_url, timeout } => {
            init_logger("research_crew=warn");
            let client = ApiClient::new(base_url.unwrap_or(config.client.base_url))
                .with_research_timeout(Duration::from_secs(timeout));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            ResearchCli::new(client, stdin, std::io::stdout()).run().await
        }
        Command::Smoke { base_url, allow_demo } => {
            init_logger("research_crew=warn");
            if config.llm.is_demo() && !allow_demo {
                println!("⚠️  GEMINI_API_KEY not found in environment variables");
                println!("   Please add your API key to .env file, or pass --allow-demo");
                return Ok(());
            }

            let client = ApiClient::new(base_url.unwrap_or(config.client.base_url));
            let summary = smoke::run_smoke(&client, &mut std::io::stdout()).await?;
            if !summary.is_success() {
                anyhow::bail!(
                    "smoke test failed: {} of {} queries failed",
                    summary.failed,
                    summary.failed + summary.passed
                );
            }
            Ok(())
        }
    }
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    info!("Configuration loaded: {:?}", config.server);

    let pipeline = ResearchPipeline::from_config(&config)?;
    let state = AppState {
        config: config.clone(),
        pipeline: Arc::new(pipeline),
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

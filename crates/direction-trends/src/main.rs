//! Direction Trends server - entry point
//!
//! Serves the dashboard views over stdio (MCP) or HTTP (REST + `/mcp`).

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use direction_trends::{
    config::Config, dashboard::Dashboard, models::SourceKind, server::McpServer,
    source::build_source,
};

#[derive(Parser, Debug)]
#[command(name = "direction-trends")]
#[command(about = "Yearly publication trends for AI research directions")]
#[command(version)]
struct Cli {
    /// Data source kind (default: TRENDS_SOURCE or object-store)
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Base URL of the data source (bucket, API root, or index file)
    #[arg(long)]
    base_url: Option<String>,

    /// Local bulk JSON file (with --source file)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Default first year
    #[arg(long)]
    start_year: Option<i32>,

    /// Default last year
    #[arg(long)]
    end_year: Option<i32>,

    /// Default ranking length
    #[arg(long)]
    top_n: Option<usize>,

    /// Use rankings precomputed by the backend when available
    #[arg(long)]
    backend_rankings: bool,

    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio", env = "TRENDS_TRANSPORT")]
    transport: Transport,

    /// HTTP bind address (only used with --transport http)
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: IpAddr,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output (MCP clients)
    #[default]
    Stdio,
    /// HTTP REST endpoints plus JSON-RPC at /mcp
    Http,
}

impl Cli {
    /// Layer command-line flags over the environment configuration.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(source) = self.source {
            if source != config.source && std::env::var_os("TRENDS_BASE_URL").is_none() {
                config.base_url = Config::default_url(source).to_string();
            }
            config.source = source;
        }
        if let Some(url) = &self.base_url {
            config.base_url.clone_from(url);
        }
        if let Some(path) = &self.data_file {
            config.data_file = Some(path.clone());
        }
        if let Some(year) = self.start_year {
            config.start_year = year;
        }
        if let Some(year) = self.end_year {
            config.end_year = year;
        }
        if let Some(n) = self.top_n {
            config.top_n = n;
        }
        if self.backend_rankings {
            config.use_backend_rankings = true;
        }
        config
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout is reserved for JSON-RPC in stdio mode
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = cli.apply(Config::from_env()?);
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?cli.transport,
        source = config.source.as_str(),
        base_url = %config.base_url,
        range = %config.year_range(),
        "Starting direction-trends"
    );

    let source = build_source(&config)?;
    let dashboard = Arc::new(Dashboard::new(source, &config));
    let server = McpServer::new(dashboard);

    match cli.transport {
        Transport::Stdio => server.run_stdio().await?,
        Transport::Http => server.run_http(SocketAddr::new(cli.host, cli.port)).await?,
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;

use depth_curve::app::{self, AppCfg};
use depth_curve::config::Config;

#[derive(Parser, Debug)]
#[command(version, about = "Liquidity depth curve CLI for Raydium pools")]
struct Args {
    /// Token mint address to aggregate pools for
    mint: String,

    /// Pool API base URL (overrides config)
    #[arg(long)]
    api_url: Option<String>,

    /// HTTP timeout in milliseconds (overrides config)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Print the full report as pretty JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Maximum number of depth points in the printed summary
    #[arg(long, default_value = "50")]
    max_points: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Load base configuration from file if provided
    let base_config = if let Some(config_path) = &args.config {
        Some(Config::from_file(config_path)?)
    } else {
        None
    };

    // Priority: CLI args > Config file > Defaults
    let mut app_cfg = match base_config {
        Some(cfg) => AppCfg::from_config(cfg, args.mint),
        None => AppCfg::new(args.mint),
    };

    if let Some(api_url) = args.api_url {
        app_cfg.api_url = api_url;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        app_cfg.timeout_ms = timeout_ms;
    }
    app_cfg.json = args.json;
    app_cfg.max_points = args.max_points;

    app::run(app_cfg).await
}

use std::path::PathBuf;
use std::time::Duration;

use agrodata::models::config::ADMIN_API_KEY_ENV;
use agrodata::models::AgrodataConfig;
use agrodata::{build_service, router, AppState, Refresher};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "agrodata", about = "Brazil agricultural data API (CONAB, SECEX)")]
struct Cli {
    /// Path to configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding `server.bind_addr`
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AgrodataConfig> {
    let Some(path) = path else {
        return Ok(AgrodataConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&config_str).with_context(|| "Failed to parse config")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    let (api_key, is_default) = config
        .admin
        .resolve_api_key(std::env::var(ADMIN_API_KEY_ENV).ok());
    if is_default {
        tracing::warn!(
            env = ADMIN_API_KEY_ENV,
            "Using built-in admin API key; set the environment variable in any real deployment"
        );
    }

    let service = build_service(&config);
    service.initialize();

    let refresher = Refresher::new(service.clone());
    if let Some(hours) = config.cache.auto_refresh_hours.filter(|h| *h > 0) {
        refresher.start_auto_refresh(Duration::from_secs(hours * 3600));
    }

    let app = router(
        AppState::new(service.clone(), refresher.clone(), &api_key),
        &config.server.cors_origins,
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received shutdown signal");
        })
        .await
        .context("Server error")?;

    refresher.shutdown().await;
    service.teardown();

    Ok(())
}

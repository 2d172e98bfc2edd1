mod config;
mod converters;
mod error;
mod llm_client;
mod logging;
mod models;
mod request_id;
mod router;

use clap::Parser;
use config::{API_KEY_ENV, Config, DEFAULT_MODEL};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{Level, info, warn};

#[derive(Parser, Debug)]
#[command(name = "prompt-relay")]
#[command(about = "Relays prompts to the Gemini API behind an OpenAI-like envelope")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    ip: String,

    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Optional YAML file listing endpoints and their models
    #[arg(short, long)]
    config: Option<String>,

    /// Model served on /api/analyze when the config file lists no endpoints
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Overrides api_base from the config file
    #[arg(long)]
    api_base: Option<String>,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[arg(long)]
    log_file: Option<String>,

    /// socks and http proxy for upstream calls, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = Level::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", args.log_level);
        Level::INFO
    });
    logging::init_logging(log_level, args.log_file.as_deref());

    let mut config = Config::load(args.config.as_deref(), &args.model)?;
    if let Some(api_base) = args.api_base {
        config.api_base = api_base;
        config.validate()?;
    }
    info!("Configuration loaded, upstream: {}", config.api_base);

    let api_key = config::api_key_from_env();
    if api_key.is_none() {
        warn!("{} is not set; relay requests will fail until it is configured", API_KEY_ENV);
    }

    let client_builder = reqwest::Client::builder();
    let client_builder = match &args.proxy {
        Some(proxy) => client_builder.proxy(reqwest::Proxy::all(proxy)?),
        None => client_builder,
    };
    let http_client = Arc::new(client_builder.build()?);
    let llm_client = Arc::new(llm_client::LlmClient::new(http_client, config.api_base.clone()));

    let app = router::build_router(&config, api_key, llm_client);

    let bind_address = format!("{}:{}", args.ip, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server started on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}

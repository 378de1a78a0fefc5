use p6_explorer::config::AppConfig;
use p6_explorer::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Info by default, RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .init();

    println!("P6 Explorer: Primavera data service browser");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}, upstream timeout={}s",
        config.server.host, config.server.port, config.upstream.timeout_secs
    );

    run_server(config).await?;

    Ok(())
}

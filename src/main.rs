use notator_backend::config::AppConfig;
use notator_backend::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Default to Info, RUST_LOG can override
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Notator: annotation backend");

    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{} data_dir={}",
        config.server.host,
        config.server.port,
        config.storage.data_dir.display()
    );

    run_server(&config).await?;

    Ok(())
}

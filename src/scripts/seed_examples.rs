use anyhow::Result;
use notator_backend::config::AppConfig;
use notator_backend::seed::load_seed_data;
use notator_backend::store::JsonlExampleStore;

/// Repopulate the examples file with the built-in sample set.
///
/// The server clears the examples file every time it starts, so run this
/// after the server is up.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let store = JsonlExampleStore::new(config.storage.examples_path());
    store.ensure_parent_dir()?;

    let count = load_seed_data(&store).await?;
    println!(
        "Wrote {} sample examples to {}",
        count,
        store.path().display()
    );

    Ok(())
}

use std::sync::Arc;

use atelier_client::AtelierClient;
use atelier_desk::commands::{self, AppContext, Cli};
use atelier_desk::core::{AppConfig, LocalStorage, SessionContext, logger};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first, flags win over both
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_env().with_overrides(cli.overrides());

    logger::init_logger(&config.log_level, config.log_dir.as_deref());
    tracing::debug!(api = %config.client.base_url, data_dir = %config.data_dir.display(), "Atelier desk starting");

    let client = Arc::new(AtelierClient::new(&config.client)?);
    let session = SessionContext::restore(Arc::new(LocalStorage::new(config.storage_path())));
    let ctx = AppContext::new(client, session, cli.assume_yes);

    if let Err(e) = commands::run(cli.command, &ctx).await {
        tracing::debug!(error = ?e, "Command failed");
        return Err(e);
    }
    Ok(())
}

use clap::Parser;
use scenevault_client::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod args;
mod render;

use app::App;
use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for tokens and listings.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenevault=info,scenevault_client=info,scenevault_views=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let app = App::connect(&config).await?;
    app.run(cli.command).await
}

use anyhow::Result;
use clap::Parser;
use khmer_shopcart::{
    cli::{Args, CliApp},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.is_production() {
        subscriber.compact().with_ansi(false).init();
    } else {
        subscriber.init();
    }

    tracing::info!("🛒 Khmer ShopCart starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config)?;
    if let Err(e) = app.run(args).await {
        tracing::error!("Command failed: {:#}", e);
        return Err(e);
    }

    tracing::info!("🛒 Khmer ShopCart stopped");
    Ok(())
}

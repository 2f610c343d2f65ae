use clap::Parser;
use tandem_app::app::{App, repl};
use tandem_app::config::{Cli, build_api, load_config};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting tandem scheduling client");

    let mut config = load_config()?;
    cli.apply(&mut config);

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let api = build_api(&config.api)?;
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(api, today);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    repl::run(&mut app, stdin, tokio::io::stdout()).await?;

    tracing::info!("Bye");
    Ok(())
}

mod args;
mod console;
mod demos;

use std::sync::Arc;

use args::{Args, Suite};
use clap::Parser;
use console::Console;
use quill_config::Config;
use quill_llm::{Gateway, TracingObserver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; process environment wins
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    // Missing credentials are the one fatal startup error
    let config = Config::from_env()?;

    let mut console = match &args.log_file {
        Some(path) => Console::file(path)
            .map_err(|e| anyhow::anyhow!("cannot open log file {}: {e}", path.display()))?,
        None => Console::stdout(),
    };

    let gateway = Gateway::new(&config).with_observer(Arc::new(TracingObserver));

    tracing::info!(base_url = %config.base_url, "starting quill");

    let suites: &[Suite] = match args.suite {
        Some(suite) => &[suite],
        None => &[Suite::Chat, Suite::Reasoning, Suite::Multimodal, Suite::Timed],
    };

    for suite in suites {
        match suite {
            Suite::Chat => demos::chat::run(&mut console, &gateway).await,
            Suite::Reasoning => demos::reasoning::run(&mut console, &gateway).await,
            Suite::Multimodal => {
                demos::multimodal::run(&mut console, &gateway, &args.pdf, &args.image).await;
            }
            Suite::Timed => demos::timed::run(&mut console, &gateway).await,
        }
    }

    console.flush();

    if let Some(path) = &args.log_file {
        println!("Output written to: {}", path.display());
    }

    Ok(())
}

/// Set up fmt logging with an env-controlled filter
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

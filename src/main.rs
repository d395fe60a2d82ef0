use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use newsdesk::app::{self, AppState};
use newsdesk::config::{self, Config};
use newsdesk::news::MemoryNewsStore;
use newsdesk::{Error, Server};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("newsdesk failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let state = AppState::new(Arc::new(MemoryNewsStore::new())).with_csrf(!config.no_csrf);
    if !state.csrf {
        info!("CSRF verification disabled");
    }

    if let Some(path) = &config.seed {
        let items = config::load_seed(path)?;
        state.seed(items).await?;
    }

    Server::bind(config.bind).serve(app::router(Arc::new(state))).await
}

use std::sync::Arc;

use anyhow::Result;
use skyboard_core::Config;
use skyboard_dashboard::{handle_commands, spawn_stdin_reader, RefreshScheduler, TextPresenter};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    skyboard_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!(city = %config.weather.city, "Skyboard starting");

    let presenter = Arc::new(TextPresenter::stdout());
    let scheduler = Arc::new(RefreshScheduler::from_config(&config, presenter)?);
    let cancel = CancellationToken::new();

    let lines = spawn_stdin_reader()?;
    let refresh_loop = tokio::spawn(scheduler.clone().run(cancel.clone()));
    let input = tokio::spawn(handle_commands(lines, scheduler, cancel.clone()));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
            }
        }
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutting down");
    cancel.cancel();
    input.await?;
    refresh_loop.await?;

    Ok(())
}

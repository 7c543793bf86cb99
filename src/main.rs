//! bola-ledger host entry point.
//!
//! Reads JSON-line commands from stdin, applies them to the ledger and
//! writes one JSON response per line to stdout. Logs go to stderr.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use bola_ledger::config::{LedgerConfig, LogFormat};
use bola_ledger::domain::{EventBus, PoolLedger};
use bola_ledger::host::handle_line;
use bola_ledger::service::LedgerService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = LedgerConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    tracing::info!(
        administrator = %config.administrator,
        remainder_policy = %config.remainder_policy,
        "starting bola-ledger"
    );

    // Build domain and service layers
    let event_bus = EventBus::new(config.event_bus_capacity);
    let ledger = PoolLedger::new(config.administrator, config.remainder_policy);
    let service = LedgerService::new(ledger, event_bus.clone());

    // Trace every published event
    let mut events = event_bus.subscribe();
    let event_logger = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        tracing::debug!(event_type = event.event_type_str(), %json, "ledger event");
                    }
                    Err(err) => tracing::warn!(error = %err, "failed to encode ledger event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&service, &line).await;
        let mut encoded = serde_json::to_vec(&response).context("encoding response")?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await.context("writing stdout")?;
        stdout.flush().await.context("flushing stdout")?;
    }

    drop(service);
    drop(event_bus);
    let _ = event_logger.await;

    tracing::info!("input closed, shutting down");
    Ok(())
}

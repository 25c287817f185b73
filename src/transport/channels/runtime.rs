use super::traits::{Channel, InboundMessage};
use crate::config::ReliabilityConfig;
use std::sync::Arc;
use std::time::Duration;

const MIN_BACKOFF_SECS: u64 = 1;

/// `(initial, max)` restart backoff for channel listeners, clamped so the
/// maximum never drops below the initial delay.
pub fn channel_backoff_settings(reliability: &ReliabilityConfig) -> (u64, u64) {
    let initial = reliability.channel_initial_backoff_secs.max(MIN_BACKOFF_SECS);
    let max = reliability.channel_max_backoff_secs.max(initial);
    (initial, max)
}

/// Run `channel.listen` forever, restarting it with exponential backoff.
///
/// The task ends once the receiving side of `tx` is dropped.
pub fn spawn_supervised_listener(
    channel: Arc<dyn Channel>,
    tx: tokio::sync::mpsc::Sender<InboundMessage>,
    initial_backoff_secs: u64,
    max_backoff_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let initial = initial_backoff_secs.max(MIN_BACKOFF_SECS);
        let max_backoff = max_backoff_secs.max(initial);
        let mut backoff = initial;

        loop {
            tracing::debug!(channel = channel.name(), "channel listener starting");
            let result = channel.listen(tx.clone()).await;

            if tx.is_closed() {
                tracing::info!(channel = channel.name(), "receiver closed; listener stopped");
                break;
            }

            match result {
                Ok(()) => {
                    tracing::warn!(channel = channel.name(), "listener exited unexpectedly; restarting");
                    backoff = initial;
                }
                Err(error) => {
                    tracing::error!(
                        channel = channel.name(),
                        backoff_secs = backoff,
                        "listener failed: {error:#}; restarting"
                    );
                }
            }

            tokio::time::sleep(Duration::from_secs(backoff)).await;
            backoff = backoff.saturating_mul(2).min(max_backoff);
        }
    })
}

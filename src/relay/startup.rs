use super::runtime::RelayRuntime;
use crate::config::Config;
use crate::llm::BackendCredentials;
use crate::ui::style;
use crate::transport::channels::{
    Channel, InboundMessage, TelegramChannel, channel_backoff_settings, spawn_supervised_listener,
};
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the relay until Ctrl-C: one supervised Telegram listener and one task
/// per inbound message.
pub async fn start_relay(config: Arc<Config>) -> Result<()> {
    let token = config.telegram_token()?.to_string();
    let channel: Arc<dyn Channel> = Arc::new(TelegramChannel::new(token, &config.telegram));
    let runtime = Arc::new(RelayRuntime::from_config(&config, Arc::clone(&channel))?);

    // Credentials are checked here, never lazily from a message handler.
    runtime.backend().ensure_authenticated().await?;

    println!("Telechat relay:");
    println!("  > backend: {} ({})", runtime.backend().name(), config.backend.base_url);
    println!(
        "  > translation: {}",
        if config.deepl_token().is_some() { "deepl" } else { "off" }
    );
    println!(
        "  > speech-to-text: {}",
        if config.deepgram_token().is_some() { "deepgram" } else { "off" }
    );
    println!("  > data: {}", config.workspace_dir.display());
    println!();
    println!("  Listening...");
    println!();

    let (initial_backoff_secs, max_backoff_secs) = channel_backoff_settings(&config.reliability);
    let (tx, rx) = mpsc::channel::<InboundMessage>(100);
    let listener =
        spawn_supervised_listener(channel, tx, initial_backoff_secs, max_backoff_secs);

    runtime.serve(rx, tokio::signal::ctrl_c()).await;

    listener.abort();
    let _ = listener.await;
    Ok(())
}

impl RelayRuntime {
    /// Handle messages from `rx`, one task each, until `shutdown` resolves
    /// or every sender is gone.
    pub async fn serve<F: Future>(
        self: Arc<Self>,
        mut rx: mpsc::Receiver<InboundMessage>,
        shutdown: F,
    ) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                received = rx.recv() => {
                    let Some(msg) = received else { break };
                    let runtime = Arc::clone(&self);
                    tokio::spawn(async move {
                        if let Err(error) = runtime.handle_message(&msg).await {
                            tracing::error!(
                                user_id = %msg.user_id,
                                message_id = %msg.message_id,
                                "message handling failed: {error:#}"
                            );
                        }
                    });
                }
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
            }
        }
    }
}

/// Report configured tokens and credentials, and probe Telegram.
pub async fn doctor(config: Arc<Config>) -> Result<()> {
    println!("{}", style::header("◆ Telechat doctor"));
    println!();
    println!("  config: {}", style::dim(config.config_path.display()));
    println!("  data:   {}", style::dim(config.workspace_dir.display()));
    println!();

    let credentials = BackendCredentials::load(&BackendCredentials::path_in(&config.workspace_dir))?;
    println!(
        "{}",
        style::status(
            credentials.is_some(),
            format!("backend login ({})", config.backend.base_url)
        )
    );
    if credentials.is_none() {
        println!("    run {}", style::command("telechat login"));
    }
    println!("{}", style::status(config.deepl_token().is_some(), "DeepL translation"));
    println!(
        "{}",
        style::status(config.deepgram_token().is_some(), "Deepgram speech-to-text")
    );

    match config.telegram_token() {
        Ok(token) => {
            let channel = TelegramChannel::new(token.to_string(), &config.telegram);
            match tokio::time::timeout(Duration::from_secs(10), channel.health_check()).await {
                Ok(true) => println!("{}", style::ok("Telegram bot reachable")),
                Ok(false) => println!("{}", style::missing("Telegram bot unhealthy (check the token)")),
                Err(_) => println!("{}", style::warn("Telegram health check timed out")),
            }
        }
        Err(error) => println!("{}", style::missing(format!("Telegram: {error}"))),
    }
    Ok(())
}

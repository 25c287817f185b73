use super::runtime::{RelayRuntime, requester_of};
use crate::commands::{Command, parse_command};
use crate::transport::channels::InboundMessage;

/// Access level a handler requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Gate {
    Everyone,
    Allowed,
    Admin,
}

fn gate_for(command: &Command) -> Gate {
    match command {
        Command::Start | Command::Unknown { .. } => Gate::Everyone,
        Command::Add { .. } | Command::Remove { .. } | Command::List => Gate::Admin,
        _ => Gate::Allowed,
    }
}

impl RelayRuntime {
    /// Handle one inbound message end to end.
    ///
    /// Errors are fatal to this message only; the caller logs them.
    pub async fn handle_message(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        if let Some(voice) = &msg.voice {
            if !self.authorize(msg, Gate::Allowed, "voice").await? {
                return Ok(());
            }
            return if msg.forwarded {
                self.voice_summary(msg, voice).await
            } else {
                self.voice_prompt(msg, voice).await
            };
        }

        let Some(text) = msg.text.as_deref() else {
            return Ok(());
        };

        let Some(command) = parse_command(text) else {
            if !self.authorize(msg, Gate::Allowed, "prompt").await? {
                return Ok(());
            }
            return self.prompt(msg, text).await;
        };

        if !self.authorize(msg, gate_for(&command), command.name()).await? {
            return Ok(());
        }
        tracing::debug!(user_id = %msg.user_id, command = command.name(), "command received");

        match command {
            Command::Start => self.start(msg).await,
            Command::Temp { value } => self.temp(msg, value.as_deref()).await,
            Command::New => self.new_conversation(msg).await,
            Command::Delete { logs } => self.delete_conversation(msg, logs).await,
            Command::Private { message } => self.private(msg, &message).await,
            Command::BotTalk {
                iterations,
                message,
            } => self.bottalk(msg, iterations, &message).await,
            Command::Translate { target } => self.translate(msg, target.as_deref()).await,
            Command::Add { user } => self.whitelist_add(msg, user.as_deref()).await,
            Command::Remove { user } => self.whitelist_remove(msg, user.as_deref()).await,
            Command::List => self.whitelist_list(msg).await,
            Command::Unknown { .. } => self.reply(msg, "Unknown command").await,
        }
    }

    /// `false` means the handler must stop without replying. Exactly one
    /// warning is logged per rejected message.
    pub(super) async fn authorize(
        &self,
        msg: &InboundMessage,
        gate: Gate,
        command: &str,
    ) -> anyhow::Result<bool> {
        let requester = requester_of(msg);
        let permitted = match gate {
            Gate::Everyone => true,
            Gate::Allowed => self.access.is_allowed(requester).await?,
            Gate::Admin => self.access.is_admin(requester).await?,
        };
        if !permitted {
            tracing::warn!(
                user_id = %msg.user_id,
                username = msg.username.as_deref().unwrap_or("unknown"),
                command,
                required = ?gate,
                "ignoring message from unauthorized user"
            );
        }
        Ok(permitted)
    }
}

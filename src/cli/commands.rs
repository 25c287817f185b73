use clap::{Parser, Subcommand};

/// `telechat` - Telegram relay for HuggingChat conversations.
#[derive(Parser, Debug)]
#[command(name = "telechat")]
#[command(version)]
#[command(about = "Relay Telegram chats to HuggingChat, with translation and voice transcription.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot (long-polls Telegram until Ctrl-C)
    Start,

    /// Store the HuggingChat session cookie used for all conversations
    Login {
        /// Cookie value (prompted with hidden input when omitted)
        #[arg(long)]
        cookie: Option<String>,
    },

    /// Manage the whitelist of users allowed to talk to the bot
    Users {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// Manage bot admins (admins are implicitly whitelisted)
    Admins {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// Check tokens, credentials and Telegram connectivity
    Doctor,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ListCommands {
    /// Add a numeric user id or @username
    Add { user: String },
    /// Remove a numeric user id or @username
    Remove { user: String },
    /// Print every entry
    List,
}

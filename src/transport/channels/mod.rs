pub mod chunker;
pub mod runtime;
pub mod telegram;
pub mod traits;

pub use runtime::{channel_backoff_settings, spawn_supervised_listener};
pub use telegram::TelegramChannel;
pub use traits::{Channel, InboundMessage, VoiceNote};

pub mod schema;

pub use schema::{BackendConfig, Config, ReliabilityConfig, TelegramConfig};

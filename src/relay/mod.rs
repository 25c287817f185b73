//! Message relay: command handlers around the Session Directory and the
//! Conversation Adapter, plus the concurrent message loop.

mod dispatch;
mod handlers;
mod runtime;
mod startup;

pub use runtime::{RelayOptions, RelayRuntime};
pub use startup::{doctor, start_relay};

//! Session Directory: one durable [`SessionRecord`] per user identity.

mod directory;
mod record;
mod store;

pub use directory::{SessionDirectory, SessionHandle};
pub use record::{Identity, SessionRecord, Temperature, derive_backing_filename};
pub use store::{SessionStore, find_identity_entry};

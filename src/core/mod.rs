pub mod access;
pub mod conversation;
pub mod logs;
pub mod sessions;

mod bottalk;
mod conversation;
mod prompt;
mod settings;
mod start;
mod voice;
mod whitelist;

pub(super) const NO_TRANSLATOR: &str =
    "This bot doesn't have a translator installed. Please ask the creator of the bot to add one.";

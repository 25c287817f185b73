use super::relay_harness::{Harness, USER_ID, capture_logs, text_message};

const REJECTION: &str = "ignoring message from unauthorized user";

#[tokio::test]
async fn unauthorized_prompt_gets_no_reply_and_one_warning() {
    let harness = Harness::new();
    let (logs, _guard) = capture_logs();

    harness.send("hello").await;

    assert!(harness.channel.sent().is_empty());
    assert_eq!(harness.backend.created(), 0);
    assert_eq!(harness.backend.chat_count(), 0);
    assert_eq!(logs.contents().matches(REJECTION).count(), 1);
    assert!(!harness.dir.path().join("sessions").exists());
}

#[tokio::test]
async fn unauthorized_commands_are_ignored() {
    let harness = Harness::new();
    let (logs, _guard) = capture_logs();

    for input in ["/temp 0.5", "/new", "/bottalk 2 hi", "/private x", "/translate de"] {
        harness.send(input).await;
    }

    assert!(harness.channel.sent().is_empty());
    assert_eq!(harness.backend.created(), 0);
    assert_eq!(logs.contents().matches(REJECTION).count(), 5);
}

#[tokio::test]
async fn start_is_open_to_everyone() {
    let harness = Harness::new();
    harness.send("/start").await;

    let text = harness.channel.last_text();
    assert!(text.starts_with("Hi I'm a Chatbot :) write anything"));
    assert!(text.contains("You are not whitelisted yet."));
    assert_eq!(harness.backend.created(), 0);
}

#[tokio::test]
async fn start_for_admin_shows_settings_and_admin_mode() {
    let harness = Harness::new();
    harness.make_admin("alice").await;
    harness.send("/start").await;

    let text = harness.channel.last_text();
    assert!(text.contains("You are whitelisted! have fun :D"));
    assert!(text.contains("Current temperature is 0.9\nUpdate with: /temp [temperature]"));
    assert!(text.ends_with("*Admin mode* 🥳"));
}

#[tokio::test]
async fn unknown_command_is_answered_for_anyone() {
    let harness = Harness::new();
    harness.send("/frobnicate now").await;
    assert_eq!(harness.channel.last_text(), "Unknown command");
}

#[tokio::test]
async fn username_and_wildcard_entries_grant_access() {
    let harness = Harness::new();
    harness.allow("@Alice").await;
    harness.send("hi").await;
    assert_eq!(harness.channel.sent().len(), 1);

    let other = Harness::new();
    other.allow("*").await;
    other.send("hi").await;
    assert_eq!(other.channel.last_text(), "reply to hi");
}

#[tokio::test]
async fn list_management_requires_admin() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    let (logs, _guard) = capture_logs();

    harness.send("/add bob").await;
    harness.send("/list").await;

    assert!(harness.channel.sent().is_empty());
    assert_eq!(logs.contents().matches(REJECTION).count(), 2);
}

#[tokio::test]
async fn admin_manages_the_whitelist() {
    let harness = Harness::new();
    harness.make_admin(USER_ID).await;

    harness.send("/add bob").await;
    assert_eq!(
        harness.channel.last_text(),
        "User \"bob\" has been added to the whitelist"
    );

    harness.send("/add @bob").await;
    assert_eq!(
        harness.channel.last_text(),
        "User \"@bob\" is already whitelisted"
    );

    harness.send("/list").await;
    assert_eq!(harness.channel.last_text(), "Whitelisted users:\n\nbob");

    harness.send("/remove bob").await;
    assert_eq!(
        harness.channel.last_text(),
        "User \"bob\" has been removed from the whitelist"
    );

    harness.send("/remove bob").await;
    assert_eq!(
        harness.channel.last_text(),
        "User \"bob\" was not whitelisted in the first place"
    );

    harness.send("/list").await;
    assert_eq!(harness.channel.last_text(), "Whitelisted users:\n\n<empty>");

    harness.send("/add").await;
    assert_eq!(
        harness.channel.last_text(),
        "Please specify a username or id like this: /add [user]"
    );
}

#[tokio::test]
async fn whitelisted_bob_can_then_prompt() {
    let harness = Harness::new();
    harness.make_admin(USER_ID).await;
    harness.send("/add bob").await;

    let mut from_bob = text_message("hey");
    from_bob.user_id = "77".into();
    from_bob.username = Some("bob".into());
    from_bob.display_name = "@bob".into();
    harness.runtime.handle_message(&from_bob).await.unwrap();

    assert_eq!(harness.channel.last_text(), "reply to hey");
}

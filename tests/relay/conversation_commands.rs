use super::relay_harness::{Harness, USER_ID, text_message};
use telechat::core::conversation::placeholder_message;
use telechat::core::sessions::Identity;

#[tokio::test]
async fn prompt_is_answered_as_reply_to_the_message() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("hello").await;

    let sent = harness.channel.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "reply to hello");
    assert_eq!(sent[0].recipient, "4242");
    assert_eq!(sent[0].reply_to.as_deref(), Some("7"));
    assert!(harness.channel.typing_count() >= 1);
}

#[tokio::test]
async fn prompt_is_logged_with_answer() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("hello").await;

    let path = harness
        .runtime
        .sessions()
        .logs()
        .path(&Identity::new(USER_ID), "conv-1")
        .unwrap();
    let log = std::fs::read_to_string(path).unwrap();
    assert!(log.contains("] user\nhello\n\n"));
    assert!(log.contains("] hugchat\nreply to hello\n\n"));
}

#[tokio::test]
async fn persistent_failure_yields_placeholder_after_five_attempts() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    for _ in 0..5 {
        harness.backend.push_failure("model overloaded");
    }

    harness.send("hello").await;

    assert_eq!(harness.backend.chat_count(), 5);
    assert_eq!(harness.channel.last_text(), placeholder_message(5));
}

#[tokio::test]
async fn recovers_on_third_attempt() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.backend.push_failure("timeout");
    harness.backend.push_failure("timeout");
    harness.backend.push_reply("hello");

    harness.send("hi").await;

    assert_eq!(harness.backend.chat_count(), 3);
    assert_eq!(harness.channel.last_text(), "hello");
}

#[tokio::test]
async fn empty_answers_count_as_attempts() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.backend.push_reply("");
    harness.backend.push_failure("boom");
    harness.backend.push_reply("   ");
    harness.backend.push_reply("finally");

    harness.send("hi").await;

    assert_eq!(harness.backend.chat_count(), 4);
    assert_eq!(harness.channel.last_text(), "finally");
}

#[tokio::test]
async fn new_keeps_the_old_conversation() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("hello").await;
    harness.send("/new").await;

    assert_eq!(harness.backend.created(), 2);
    assert!(harness.backend.deleted().is_empty());
    assert_eq!(
        harness.channel.last_text(),
        "New conversation was started, the old one is still on HuggingChat"
    );

    let session = harness
        .runtime
        .sessions()
        .get_or_create(&Identity::new(USER_ID), "@alice")
        .await
        .unwrap();
    assert_eq!(session.lock().await.conversation_handle.as_str(), "conv-2");
}

#[tokio::test]
async fn delete_with_logs_removes_the_log() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("hello").await;

    let identity = Identity::new(USER_ID);
    let logs = harness.runtime.sessions().logs();
    assert!(logs.path(&identity, "conv-1").is_some());

    harness.send("/delete logs").await;

    assert_eq!(harness.backend.deleted().len(), 1);
    assert_eq!(harness.backend.deleted()[0].as_str(), "conv-1");
    assert!(logs.path(&identity, "conv-1").is_none());
    assert_eq!(harness.persisted_handle(), "conv-2");
    assert_eq!(
        harness.channel.last_text(),
        "Conversation has been deleted and a new one has been started\nand the logs have been deleted"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn delete_persists_new_handle_even_when_log_removal_fails() {
    use std::os::unix::fs::PermissionsExt;

    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("hello").await;

    let identity = Identity::new(USER_ID);
    let log = harness
        .runtime
        .sessions()
        .logs()
        .path(&identity, "conv-1")
        .unwrap();
    let folder = log.parent().unwrap().to_path_buf();
    std::fs::set_permissions(&folder, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore directory permissions, so removal cannot fail.
    let write_check = folder.join(".write_check");
    if std::fs::File::create(&write_check).is_ok() {
        std::fs::remove_file(&write_check).unwrap();
        std::fs::set_permissions(&folder, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = harness
        .runtime
        .handle_message(&text_message("/delete logs"))
        .await;
    std::fs::set_permissions(&folder, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(result.is_err());
    assert!(log.exists());
    assert_eq!(harness.backend.deleted()[0].as_str(), "conv-1");
    assert_eq!(harness.persisted_handle(), "conv-2");

    let (restarted, _channel) = harness.restart();
    restarted
        .handle_message(&text_message("still there?"))
        .await
        .unwrap();
    let (handle, _, _) = harness.backend.chats().pop().unwrap();
    assert_eq!(handle.as_str(), "conv-2");
}

#[tokio::test]
async fn delete_without_logs_keeps_the_log() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("hello").await;
    harness.send("/delete").await;

    assert_eq!(harness.backend.deleted()[0].as_str(), "conv-1");
    assert_eq!(harness.persisted_handle(), "conv-2");
    assert!(
        harness
            .runtime
            .sessions()
            .logs()
            .path(&Identity::new(USER_ID), "conv-1")
            .is_some()
    );
    assert_eq!(
        harness.channel.last_text(),
        "Conversation has been deleted and a new one has been started\nbut the logs have been kept"
    );
}

#[tokio::test]
async fn private_uses_a_discarded_temporary_conversation() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;

    harness.send("/private what is rust").await;

    let chats = harness.backend.chats();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].0.as_str(), "conv-2");
    assert_eq!(chats[0].1, "what is rust");
    let deleted: Vec<String> = harness
        .backend
        .deleted()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(deleted, vec!["conv-2"]);

    let sent = harness.channel.sent();
    assert_eq!(sent[0].text, "reply to what is rust");
    assert_eq!(sent[0].reply_to.as_deref(), Some("7"));

    let session = harness
        .runtime
        .sessions()
        .get_or_create(&Identity::new(USER_ID), "@alice")
        .await
        .unwrap();
    assert_eq!(session.lock().await.conversation_handle.as_str(), "conv-1");
}

#[tokio::test]
async fn private_without_message_shows_usage() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("/private").await;

    assert_eq!(
        harness.channel.last_text(),
        "Please specify a message like this: /private [message]"
    );
    assert_eq!(harness.backend.chat_count(), 0);
}

#[tokio::test]
async fn long_answers_are_split_into_chunks() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    let long = "word ".repeat(1500);
    harness.backend.push_reply(&long);

    harness.send("tell me a lot").await;

    let sent = harness.channel.sent();
    assert!(sent.len() >= 2);
    assert!(sent.iter().all(|s| s.text.chars().count() <= 3500));
    assert_eq!(sent[0].reply_to.as_deref(), Some("7"));
    assert!(sent[1..].iter().all(|s| s.reply_to.is_none()));
}

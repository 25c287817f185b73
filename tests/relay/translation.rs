use super::relay_harness::{Harness, USER_ID, text_message};
use telechat::core::sessions::Identity;

const NO_TRANSLATOR: &str = "This bot doesn't have a translator installed. Please ask the creator of the bot to add one.";

#[tokio::test]
async fn enabled_translation_wraps_the_backend_round_trip() {
    let harness = Harness::with_translator();
    harness.allow(USER_ID).await;

    harness.send("/translate de").await;
    assert!(
        harness
            .channel
            .last_text()
            .starts_with("Language set to DE. You can now write in your language")
    );

    harness.send("hallo").await;

    let (_, prompt, _) = harness.backend.chats().pop().unwrap();
    assert_eq!(prompt, "[EN-US] hallo");
    assert_eq!(harness.channel.last_text(), "[DE] reply to [EN-US] hallo");

    let path = harness
        .runtime
        .sessions()
        .logs()
        .path(&Identity::new(USER_ID), "conv-1")
        .unwrap();
    let log = std::fs::read_to_string(path).unwrap();
    assert!(log.contains("] translated from DE to english\n[EN-US] hallo\n\n"));
    assert!(log.contains("] translated from english to DE\n[DE] reply to [EN-US] hallo\n\n"));
}

#[tokio::test]
async fn translation_setting_survives_restart() {
    let harness = Harness::with_translator();
    harness.allow(USER_ID).await;
    harness.send("/translate fr").await;

    let (restarted, channel) = harness.restart();
    restarted
        .handle_message(&text_message("bonjour"))
        .await
        .unwrap();

    assert_eq!(channel.last_text(), "[FR] reply to [EN-US] bonjour");
}

#[tokio::test]
async fn translate_off_disables_translation() {
    let harness = Harness::with_translator();
    harness.allow(USER_ID).await;
    harness.send("/translate de").await;
    harness.send("/translate off").await;
    assert_eq!(harness.channel.last_text(), "Translation disabled");

    let calls_before = harness.translator.as_ref().unwrap().calls();
    harness.send("plain").await;

    assert_eq!(harness.channel.last_text(), "reply to plain");
    assert_eq!(harness.translator.as_ref().unwrap().calls(), calls_before);
}

#[tokio::test]
async fn unknown_language_code_lists_the_choices() {
    let harness = Harness::with_translator();
    harness.allow(USER_ID).await;
    harness.send("/translate xx").await;

    let text = harness.channel.last_text();
    assert!(text.starts_with("Unrecognized language code: xx\n\npossible language codes:\n\n"));
    assert!(text.contains("DE"));
}

#[tokio::test]
async fn translate_without_argument_lists_the_choices() {
    let harness = Harness::with_translator();
    harness.allow(USER_ID).await;
    harness.send("/translate").await;

    assert!(
        harness
            .channel
            .last_text()
            .starts_with("Please specify a language like this: /translate [language]")
    );
}

#[tokio::test]
async fn translate_without_translator_explains() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    harness.send("/translate de").await;

    assert_eq!(harness.channel.last_text(), NO_TRANSLATOR);

    harness.send("hallo").await;
    assert_eq!(harness.channel.last_text(), "reply to hallo");
}

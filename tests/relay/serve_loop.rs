use std::time::Duration;

use super::relay_harness::{Harness, USER_ID, text_message};
use tokio::sync::{mpsc, oneshot};

const DEADLINE: Duration = Duration::from_secs(5);

#[tokio::test]
async fn shutdown_stops_the_loop_while_senders_are_alive() {
    let (runtime, _channel, _dir) = Harness::new().into_shared();
    let (_tx, rx) = mpsc::channel(8);
    let (stop, shutdown) = oneshot::channel::<()>();

    stop.send(()).unwrap();
    tokio::time::timeout(DEADLINE, runtime.serve(rx, shutdown))
        .await
        .expect("loop did not stop on shutdown");
}

#[tokio::test]
async fn shutdown_fired_after_several_messages_is_observed() {
    let harness = Harness::new();
    harness.allow(USER_ID).await;
    let (runtime, channel, _dir) = harness.into_shared();
    let (tx, rx) = mpsc::channel(8);
    let (stop, shutdown) = oneshot::channel::<()>();

    let driver = async {
        for text in ["one", "two", "three"] {
            tx.send(text_message(text)).await.unwrap();
        }
        while channel.sent().len() < 3 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        stop.send(()).unwrap();
    };

    let (served, ()) = tokio::join!(
        tokio::time::timeout(DEADLINE, runtime.serve(rx, shutdown)),
        driver,
    );
    served.expect("loop did not stop on shutdown");

    let mut texts = channel.texts();
    texts.sort();
    assert_eq!(texts, vec!["reply to one", "reply to three", "reply to two"]);
}

#[tokio::test]
async fn loop_ends_when_all_senders_are_dropped() {
    let (runtime, _channel, _dir) = Harness::new().into_shared();
    let (tx, rx) = mpsc::channel(8);
    drop(tx);

    tokio::time::timeout(DEADLINE, runtime.serve(rx, std::future::pending::<()>()))
        .await
        .expect("loop did not stop after the channel closed");
}

mod common;

use common::{config_for, feed_server, resetting_feed_server};
use seqfeed::{FeedConnection, FeedEvent, FeedState, FeedSubscriber};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(10);

fn tx_frame(n: u64) -> String {
    json!({
        "from": "0x1111111111111111111111111111111111111111",
        "to": format!("0x{:040x}", n),
        "value": format!("0x{:x}", n),
    })
    .to_string()
}

async fn drain(connection: &mut FeedConnection, subscriber: &mut FeedSubscriber) -> Vec<FeedEvent> {
    let mut events = Vec::new();
    while let Some(event) = timeout(WAIT, connection.next()).await.expect("feed stalled") {
        events.push(event.clone());
        subscriber.apply(event);
    }
    events
}

#[tokio::test]
async fn test_feed_keeps_ten_newest_and_drops_garbage() {
    let mut frames: Vec<String> = (0..12).map(tx_frame).collect();
    frames.insert(5, "this is not json".to_string());
    frames.insert(9, "[1,2,3]".to_string());
    let (addr, _gone) = feed_server(frames, true).await;

    let config = config_for(None, Some(addr), None);
    let mut connection = FeedConnection::spawn(config.feed_url.clone());
    let mut subscriber = FeedSubscriber::new(config.feed_capacity);

    let events = drain(&mut connection, &mut subscriber).await;

    assert_eq!(events.first(), Some(&FeedEvent::Opened));
    assert_eq!(events.last(), Some(&FeedEvent::Closed));
    let records = events.iter().filter(|e| matches!(e, FeedEvent::Record(_))).count();
    assert_eq!(records, 12);

    assert_eq!(subscriber.state(), FeedState::Closed);
    assert_eq!(subscriber.received(), 12);
    assert_eq!(subscriber.list().len(), 10);

    let values: Vec<String> = subscriber.list().iter().map(|r| r.value_display()).collect();
    let expected: Vec<String> = (2..12).rev().map(|n| format!("0x{:x}", n)).collect();
    assert_eq!(values, expected);
}

#[tokio::test]
async fn test_close_tears_down_socket() {
    let (addr, gone) = feed_server(vec![tx_frame(1)], false).await;

    let config = config_for(None, Some(addr), None);
    let mut connection = FeedConnection::spawn(config.feed_url.clone());

    let first = timeout(WAIT, connection.next()).await.unwrap();
    assert_eq!(first, Some(FeedEvent::Opened));
    let second = timeout(WAIT, connection.next()).await.unwrap();
    assert!(matches!(second, Some(FeedEvent::Record(_))));

    connection.close();
    assert!(connection.is_closed());
    assert!(connection.try_next().is_none());
    assert!(connection.next().await.is_none());

    timeout(WAIT, gone).await.expect("server never saw the client leave").unwrap();
}

#[tokio::test]
async fn test_drop_tears_down_socket() {
    let (addr, gone) = feed_server(Vec::new(), false).await;

    let config = config_for(None, Some(addr), None);
    let mut connection = FeedConnection::spawn(config.feed_url.clone());
    assert_eq!(timeout(WAIT, connection.next()).await.unwrap(), Some(FeedEvent::Opened));

    drop(connection);
    timeout(WAIT, gone).await.expect("server never saw the client leave").unwrap();
}

#[tokio::test]
async fn test_refused_connection_closes_without_opening() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let addr = format!("127.0.0.1:{}", port).parse().unwrap();

    let config = config_for(None, Some(addr), None);
    let mut connection = FeedConnection::spawn(config.feed_url.clone());
    let mut subscriber = FeedSubscriber::new(config.feed_capacity);

    let events = drain(&mut connection, &mut subscriber).await;
    assert_eq!(events, vec![FeedEvent::Closed]);
    assert_eq!(subscriber.state(), FeedState::Closed);
    assert!(subscriber.list().is_empty());
}

#[tokio::test]
async fn test_connection_reset_reports_error_then_closes() {
    let addr = resetting_feed_server(Vec::new()).await;

    let config = config_for(None, Some(addr), None);
    let mut connection = FeedConnection::spawn(config.feed_url.clone());
    let mut subscriber = FeedSubscriber::new(config.feed_capacity);

    let events = drain(&mut connection, &mut subscriber).await;

    assert_eq!(events.first(), Some(&FeedEvent::Opened));
    assert_eq!(events.last(), Some(&FeedEvent::Closed));
    let errors: Vec<&String> = events
        .iter()
        .filter_map(|e| match e {
            FeedEvent::Errored(message) => Some(message),
            _ => None,
        })
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Feed stream error"));

    assert_eq!(subscriber.state(), FeedState::Closed);
    assert!(subscriber.list().is_empty());
    assert_eq!(subscriber.last_error(), Some(errors[0].as_str()));
}

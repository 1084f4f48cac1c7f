//! Integration tests for the JSON event transport.

mod common;

use common::{TestServer, WsClient};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn registration_over_websocket() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut web = WsClient::connect(&server.websocket_url(), "webby")
        .await
        .expect("Failed to connect");

    let events = web.register().await.expect("registration");
    assert_eq!(events[0]["event"], "RPL_WELCOME");
    assert_eq!(events[0]["data"]["num"], 1);
    let myinfo = events
        .iter()
        .find(|e| e["event"] == "RPL_MYINFO")
        .expect("RPL_MYINFO");
    assert_eq!(myinfo["data"]["params"][0], "irc.test");
}

#[tokio::test]
async fn undecodable_frames_are_ignored() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let (mut socket, _) = connect_async(server.websocket_url())
        .await
        .expect("Failed to connect");

    socket
        .send(Message::Text("this is not json".into()))
        .await
        .expect("send");
    socket
        .send(Message::Text(r#"{"event":"TELEPORT","data":{}}"#.into()))
        .await
        .expect("send");
    socket
        .send(Message::Text(
            json!({"event": "PING", "data": {"source": "probe"}}).to_string(),
        ))
        .await
        .expect("send");

    let frame = tokio::time::timeout(std::time::Duration::from_secs(5), socket.next())
        .await
        .expect("timely reply")
        .expect("open stream")
        .expect("frame");
    let Message::Text(text) = frame else {
        panic!("expected a text frame, got {frame:?}");
    };
    let envelope: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(envelope["event"], "PONG");
    assert_eq!(envelope["data"]["source"], "probe");
}

#[tokio::test]
async fn disallowed_origin_is_refused() {
    let server = TestServer::spawn_with_origins(&["https://chat.example"])
        .await
        .expect("Failed to spawn test server");
    let mut request = server
        .websocket_url()
        .into_client_request()
        .expect("request");
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_static("https://evil.example"));
    assert!(connect_async(request).await.is_err());

    let mut request = server
        .websocket_url()
        .into_client_request()
        .expect("request");
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_static("https://chat.example"));
    assert!(connect_async(request).await.is_ok());
}

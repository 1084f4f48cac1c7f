//! Integration tests for channel flows: JOIN, PRIVMSG, TOPIC, KICK, and
//! traffic crossing between the text and WebSocket transports.

mod common;

use common::{TestClient, TestServer, WsClient};
use serde_json::json;

#[tokio::test]
async fn test_channel_privmsg_flow() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to connect alice");
    let mut bob = TestClient::connect(server.address(), "bob")
        .await
        .expect("Failed to connect bob");
    alice.register().await.expect("Alice registration failed");
    bob.register().await.expect("Bob registration failed");

    let joined = alice.join("#test").await.expect("Alice join failed");
    let names = joined.iter().find(|l| l.is("353")).expect("NAMES reply");
    assert_eq!(names.param(1), "=");
    assert_eq!(names.trailing(), "@alice");

    let joined = bob.join("#test").await.expect("Bob join failed");
    let names = joined.iter().find(|l| l.is("353")).expect("NAMES reply");
    assert_eq!(names.trailing(), "@alice bob");

    let seen = alice
        .recv_until(|l| l.command == "JOIN")
        .await
        .expect("Alice should see Bob join");
    assert!(seen.last().is_some_and(|l| l.prefix.as_deref() == Some("bob!bob@127.0.0.1")));

    alice
        .send_raw("PRIVMSG #test :hello from alice")
        .await
        .expect("Alice privmsg failed");
    let messages = bob
        .recv_until(|l| l.command == "PRIVMSG")
        .await
        .expect("Bob failed to receive PRIVMSG");
    let msg = messages.last().expect("privmsg");
    assert_eq!(msg.param(0), "#test");
    assert_eq!(msg.trailing(), "hello from alice");
}

#[tokio::test]
async fn topic_and_kick_are_broadcast() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to connect alice");
    let mut bob = TestClient::connect(server.address(), "bob")
        .await
        .expect("Failed to connect bob");
    alice.register().await.expect("Alice registration failed");
    bob.register().await.expect("Bob registration failed");
    alice.join("#ops").await.expect("Alice join failed");
    bob.join("#ops").await.expect("Bob join failed");

    bob.send_raw("TOPIC #ops :bob was here").await.expect("send");
    bob.recv_until(|l| l.command == "TOPIC")
        .await
        .expect("topic is not locked by default");

    alice.send_raw("MODE #ops +tn").await.expect("send");
    bob.recv_until(|l| l.command == "MODE")
        .await
        .expect("Bob should see +tn");
    bob.send_raw("TOPIC #ops :again").await.expect("send");
    let refused = bob.expect("482").await.expect("482");
    assert_eq!(refused.param(1), "#ops");

    alice.send_raw("KICK #ops bob :behave").await.expect("send");
    let kicked = bob
        .recv_until(|l| l.command == "KICK")
        .await
        .expect("Bob should see the KICK");
    let kick = kicked.last().expect("kick line");
    assert_eq!(kick.param(0), "#ops");
    assert_eq!(kick.param(1), "bob");
    assert_eq!(kick.trailing(), "behave");

    bob.send_raw("PRIVMSG #ops :still here?").await.expect("send");
    bob.expect("404").await.expect("no longer a member");
}

#[tokio::test]
async fn messages_cross_transports() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to connect alice");
    let mut web = WsClient::connect(&server.websocket_url(), "webby")
        .await
        .expect("Failed to connect webby");
    alice.register().await.expect("Alice registration failed");
    web.register().await.expect("Webby registration failed");

    web.send("JOIN", json!({ "channels": ["#bridge"] }))
        .await
        .expect("send");
    let joined = web.recv_until("RPL_ENDOFNAMES").await.expect("join");
    assert_eq!(joined[0]["event"], "JOIN");
    assert_eq!(joined[0]["data"]["nick"], "webby");

    let joined = alice.join("#bridge").await.expect("Alice join failed");
    let names = joined.iter().find(|l| l.is("353")).expect("NAMES reply");
    assert_eq!(names.trailing(), "@webby alice");

    alice
        .send_raw("PRIVMSG #bridge :hi web")
        .await
        .expect("send");
    let events = web.recv_until("PRIVMSG").await.expect("PRIVMSG");
    let msg = &events[events.len() - 1]["data"];
    assert_eq!(msg["nick"], "alice");
    assert_eq!(msg["target"], "#bridge");
    assert_eq!(msg["message"], "hi web");

    web.send("PRIVMSG", json!({ "target": "alice", "message": "hi text" }))
        .await
        .expect("send");
    let lines = alice
        .recv_until(|l| l.command == "PRIVMSG")
        .await
        .expect("PRIVMSG");
    let line = lines.last().expect("privmsg");
    assert_eq!(line.prefix.as_deref(), Some("webby!webby@127.0.0.1"));
    assert_eq!(line.param(0), "alice");
    assert_eq!(line.trailing(), "hi text");

    // Nicknames are shared between the transports.
    web.send("NICK", json!({ "nickname": "ALICE" }))
        .await
        .expect("send");
    let refused = web.recv_until("ERR_NICKNAMEINUSE").await.expect("433");
    assert_eq!(refused[refused.len() - 1]["data"]["num"], 433);
}

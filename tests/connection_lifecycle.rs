//! Integration tests for registration, keepalive and QUIT over the text transport.

mod common;

use common::{TestClient, TestServer};

#[tokio::test]
async fn registration_burst_is_ordered() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to connect alice");

    let burst = alice.register().await.expect("Alice registration failed");
    let codes: Vec<&str> = burst.iter().map(|l| l.command.as_str()).collect();
    assert_eq!(
        codes,
        ["001", "002", "003", "004", "251", "252", "253", "254", "255", "422"]
    );
    assert_eq!(burst[0].prefix.as_deref(), Some("irc.test"));
    assert_eq!(burst[0].param(0), "alice");
    assert!(burst[0].trailing().contains("alice"));
    assert_eq!(burst[3].param(1), "irc.test");
}

#[tokio::test]
async fn commands_before_registration_are_refused() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut client = TestClient::connect(server.address(), "early")
        .await
        .expect("Failed to connect");

    client.send_raw("JOIN #early").await.expect("send");
    let refusal = client.expect("451").await.expect("451");
    assert_eq!(refusal.param(0), "*");
}

#[tokio::test]
async fn nickname_collision_is_rejected() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to connect alice");
    alice.register().await.expect("Alice registration failed");

    let mut other = TestClient::connect(server.address(), "ALICE")
        .await
        .expect("Failed to connect");
    other.send_raw("NICK ALICE").await.expect("send");
    let in_use = other.expect("433").await.expect("433");
    assert_eq!(in_use.param(1), "ALICE");

    other.send_raw("NICK alice2").await.expect("send");
    other
        .send_raw("USER alice2 0 * :Second Alice")
        .await
        .expect("send");
    let welcome = other.expect("001").await.expect("001");
    assert_eq!(welcome.param(0), "alice2");
}

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to connect alice");
    alice.register().await.expect("Alice registration failed");

    alice.send_raw("PING :token").await.expect("send");
    let pong = alice
        .recv_until(|l| l.command == "PONG")
        .await
        .expect("PONG");
    assert!(pong.last().is_some_and(|l| l.prefix.as_deref() == Some("irc.test")));
}

#[tokio::test]
async fn quit_closes_link_and_notifies_peers() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to connect alice");
    let mut bob = TestClient::connect(server.address(), "bob")
        .await
        .expect("Failed to connect bob");
    alice.register().await.expect("Alice registration failed");
    bob.register().await.expect("Bob registration failed");
    alice.join("#lobby").await.expect("Alice join failed");
    bob.join("#lobby").await.expect("Bob join failed");

    alice.send_raw("QUIT :gone fishing").await.expect("send");
    let error = alice
        .recv_until(|l| l.command == "ERROR")
        .await
        .expect("ERROR");
    let error = error.last().expect("error line");
    assert!(error.trailing().starts_with("Closing Link: 127.0.0.1"));
    assert!(error.trailing().contains("gone fishing"));
    assert!(alice.closed().await, "server should close the link");

    let quit = bob
        .recv_until(|l| l.command == "QUIT")
        .await
        .expect("Bob should see QUIT");
    let quit = quit.last().expect("quit line");
    assert!(quit.prefix.as_deref().is_some_and(|p| p.starts_with("alice!")));
    assert_eq!(quit.trailing(), "gone fishing");
}

#[tokio::test]
async fn dropped_connection_frees_the_nickname() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    {
        let mut alice = TestClient::connect(server.address(), "alice")
            .await
            .expect("Failed to connect alice");
        alice.register().await.expect("Alice registration failed");
    }

    let mut again = TestClient::connect(server.address(), "alice")
        .await
        .expect("Failed to reconnect");
    again
        .send_raw("USER alice 0 * :Alice Again")
        .await
        .expect("send");
    // The teardown of the first connection may race this registration.
    for _ in 0..50 {
        again.send_raw("NICK alice").await.expect("send");
        let lines = again
            .recv_until(|l| l.is("433") || l.is("001"))
            .await
            .expect("NICK reply");
        if lines.iter().any(|l| l.is("001")) {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("nickname never released");
}

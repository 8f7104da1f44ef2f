//! End-to-end tests through the accept loop on a real socket

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use flatserve::config::Limits;
use flatserve::server::Dispatcher;
use flatserve::server::listener::serve;
use flatserve::storage::FileStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start_server(root: &Path, max_connections: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let dispatcher = Arc::new(Dispatcher::new(FileStore::new(root)));
    let limits = Limits {
        body_idle_timeout: Duration::from_millis(500),
        ..Limits::default()
    };

    tokio::spawn(serve(listener, dispatcher, limits, max_connections));
    addr
}

async fn request(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

#[tokio::test]
async fn test_round_trip_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path(), 16).await;

    let response = request(addr, b"PUT /greeting.txt HTTP/1.1\r\n\r\nhi there").await;
    assert_eq!(response, "HTTP/1.1 200 OK\r\n\r\nFile uploaded successfully.");

    let response = request(addr, b"GET /greeting.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response, "HTTP/1.1 200 OK\r\n\r\nhi there");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_gets_do_not_interfere() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.txt"), "first file").unwrap();
    std::fs::write(dir.path().join("two.txt"), "second file").unwrap();
    let addr = start_server(dir.path(), 16).await;

    let (a, b) = tokio::join!(
        request(addr, b"GET /one.txt HTTP/1.1\r\n\r\n"),
        request(addr, b"GET /two.txt HTTP/1.1\r\n\r\n"),
    );

    assert_eq!(a, "HTTP/1.1 200 OK\r\n\r\nfirst file");
    assert_eq!(b, "HTTP/1.1 200 OK\r\n\r\nsecond file");
}

#[tokio::test]
async fn test_stalled_peer_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ready.txt"), "ready").unwrap();
    let addr = start_server(dir.path(), 16).await;

    // connects and never sends anything
    let _stalled = TcpStream::connect(addr).await.unwrap();

    let response = tokio::time::timeout(
        Duration::from_secs(2),
        request(addr, b"GET /ready.txt HTTP/1.1\r\n\r\n"),
    )
    .await
    .unwrap();

    assert_eq!(response, "HTTP/1.1 200 OK\r\n\r\nready");
}

#[tokio::test]
async fn test_connections_over_capacity_are_closed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "A").unwrap();
    let addr = start_server(dir.path(), 1).await;

    // holds the only worker slot until it sends its request
    let mut first = TcpStream::connect(addr).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut second = TcpStream::connect(addr).await.unwrap();
    let mut out = Vec::new();
    let rejected = second.read_to_end(&mut out).await;
    assert!(rejected.is_err() || out.is_empty());

    first.write_all(b"GET /a.txt\r\n\r\n").await.unwrap();
    first.shutdown().await.unwrap();
    let mut out = Vec::new();
    first.read_to_end(&mut out).await.unwrap();
    assert_eq!(out, b"HTTP/1.1 200 OK\r\n\r\nA".to_vec());
}

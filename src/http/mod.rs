//! Wire protocol.
//!
//! A request is one line, `<OPERATION> <TARGET>`, optionally followed by a
//! blank line and body bytes running until the client stops sending. A
//! response is `HTTP/1.1 <code> <reason>\r\n\r\n<body>` with the end of the
//! body marked by closing the connection.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection worker implementing the state machine below
//! - **`parser`**: locates and parses the request line
//! - **`request`**: operation and target name
//! - **`response`**: status codes and the response descriptor
//! - **`writer`**: serializes a response onto the stream
//!
//! # Connection State Machine
//!
//! ```text
//!   Reading ──▶ Parsing ──▶ Validating ──▶ Dispatching ──▶ Responding ──▶ Closed
//!      │           │            │                              ▲
//!      └───────────┴────────────┴── error response ────────────┘
//! ```
//!
//! There is no keep-alive: every connection carries exactly one request.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use flatserve::config::Limits;
//! use flatserve::http::connection::Connection;
//! use flatserve::server::Dispatcher;
//! use flatserve::storage::FileStore;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let dispatcher = Arc::new(Dispatcher::new(FileStore::new("./www")));
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let dispatcher = Arc::clone(&dispatcher);
//!         tokio::spawn(async move {
//!             Connection::new(socket, peer, dispatcher, Limits::default()).run().await;
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

//! Flatserve - minimal network file server
//!
//! Serves GET, PUT, POST (append) and DELETE on the files of one flat
//! directory, one request per connection.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod storage;

//! Accepting connections and running file operations
//!
//! - **`listener`**: the accept loop, one worker task per connection
//! - **`dispatcher`**: maps a request to a file operation and a response
//! - **`body`**: streams PUT/POST bodies from the connection into a file

pub mod body;
pub mod dispatcher;
pub mod listener;

pub use dispatcher::Dispatcher;

//! Postboard server
//!
//! HTTP front-end for `postboard-core`. The `postboard` binary wraps this
//! with a command-line interface.

pub mod server;

pub use server::{router, serve, AppState};

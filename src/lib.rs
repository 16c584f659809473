//! Construct is a full-screen terminal chat client for a webhook automation
//! endpoint, dressed up in a Matrix-style theme.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state (transcript, input, busy tracking), the
//!   request orchestration that races the webhook call against a timeout,
//!   fault classification, and configuration.
//! - [`ui`] renders the terminal interface, runs the interactive event loop,
//!   and drives the digital-rain animation while a request is in flight.
//! - [`api`] defines the webhook payload types and the reply decoder.
//! - [`utils`] holds transcript logging.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`), which
//! parses CLI arguments, loads configuration, and dispatches into
//! [`ui::chat_loop::run_chat`].

pub mod api;
pub mod core;
pub mod ui;
pub mod utils;

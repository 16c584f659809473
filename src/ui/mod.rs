//! Terminal UI layer for the chat session.
//!
//! The UI module owns rendering, keyboard handling, and loop control for the
//! text user interface:
//! - [`chat_loop`]: the main interaction loop that dispatches submissions to
//!   [`crate::core::request`] and folds settlements back into the session.
//! - [`renderer`]: view composition and frame output.
//! - [`rain`]: the digital-rain animation shown while a request is in flight.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the transcript and request lifecycle.

pub mod chat_loop;
pub mod rain;
pub mod renderer;

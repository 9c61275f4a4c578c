//! Error types for the Zenalyze client.
//!
//! Two domains of failure reach the user:
//!
//! - [`ChatError`] — the streamed-chat pipeline (rate limiting, payment
//!   required, transport failures, internal protocol faults)
//! - [`StoreError`] — row reads/writes against the backend collections
//!
//! Both expose `user_message()` for the toast line; everything else
//! (config/session file problems) uses `thiserror` types local to those
//! modules and surfaces at startup.

mod chat;
mod store;

pub use chat::ChatError;
pub use store::StoreError;

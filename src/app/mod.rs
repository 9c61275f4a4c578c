//! Application state and async coordination.
//!
//! The TUI task owns [`App`] and mutates it from two inputs: keyboard
//! events and [`AppMessage`]s arriving on an mpsc channel. Everything that
//! touches the network runs in spawned tasks that report back through
//! that channel, so the render state never crosses a task boundary.

mod messages;
mod state;
mod worker;

pub use messages::AppMessage;
pub use state::{App, Screen, Toast};
pub use worker::spawn_chat_worker;

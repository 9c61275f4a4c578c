//! Terminal client for the Zenalyze mental-wellness backend.
//!
//! The core is the streamed chat pipeline in [`chat`]; everything else
//! supports it: typed models, the row store for journals and directories,
//! transport traits with real and mock adapters, and the ratatui front end.

pub mod adapters;
pub mod app;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod traits;
pub mod ui;

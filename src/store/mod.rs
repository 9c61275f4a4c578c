//! Row client for the hosted backend collections.
//!
//! The backend exposes Postgres tables over a REST row interface:
//! `GET /rest/v1/{collection}?select=*&...` to read and
//! `POST /rest/v1/{collection}` to insert, authenticated with the
//! publishable key plus an optional user bearer. This module wraps the
//! generic verbs and the typed per-collection calls the screens use.

mod client;

pub use client::StoreClient;

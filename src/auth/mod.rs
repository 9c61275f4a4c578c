//! Session storage.
//!
//! The backend owns authentication; this module only stores and reads the
//! session it issued, from `~/.config/zenalyze/session.json` with env-var
//! overrides for headless use.

mod session;

pub use session::{Session, SessionError, SessionStore, ENV_ACCESS_TOKEN, ENV_USER_ID};

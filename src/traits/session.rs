//! Authenticated-session trait abstraction.
//!
//! The backend issues and refreshes credentials; this client only reads
//! them. The trait exposes the two things request builders need: an
//! opaque bearer credential and a stable user identifier.

/// Source of the current authenticated session.
///
/// Implemented by the file-backed [`crate::auth::Session`].
pub trait SessionProvider: Send + Sync {
    /// The bearer credential to attach to outbound requests.
    ///
    /// `None` when no session is stored; callers surface this as a
    /// sign-in prompt rather than issuing unauthenticated requests.
    fn bearer_token(&self) -> Option<String>;

    /// The stable identifier of the signed-in user, used to key rows in
    /// user-owned collections.
    fn user_id(&self) -> Option<String>;
}

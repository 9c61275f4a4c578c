//! Trait abstractions for dependency injection.
//!
//! These traits decouple the application from concrete I/O so that the
//! chat pipeline and store client can be tested against mocks.

mod http;
mod session;

pub use http::{ByteStream, Headers, HttpClient, HttpError, HttpResponse};
pub use session::SessionProvider;

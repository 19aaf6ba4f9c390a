//! Authentication module
//!
//! Cookie-based sessions: logging in stores the backend's session cookie in
//! the client's jar and yields a [`Session`] naming the current user.
//! Operations that act for the user take the session explicitly.

mod service;
mod session;

pub use service::AuthApi;
pub use session::Session;

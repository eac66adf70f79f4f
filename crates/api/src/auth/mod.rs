//! Caller identity.
//!
//! - [`session::SessionProvider`] -- source of the current session.
//! - [`session::FixtureSessionProvider`] -- fixed identity from configuration.

pub mod session;

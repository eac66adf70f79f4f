//! Domain layer for the newsletter service.
//!
//! Pure logic only: roles and the authorization predicate, the per-operation
//! policy table, entity statuses, identifier generation and error types.
//! Nothing in here performs I/O.

pub mod access;
pub mod error;
pub mod ids;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;

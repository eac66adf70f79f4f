//! HTTP handlers, one module per resource.

pub mod project;
pub mod session;
pub mod template;

//! Row models and request DTOs.

pub mod project;
pub mod template;

/// Entity identifiers are prefixed strings (`proj_…`, `tmpl_…`).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Version assigned to a template created without one.
pub const DEFAULT_TEMPLATE_VERSION: &str = "0.1.0";

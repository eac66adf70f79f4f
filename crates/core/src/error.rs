#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn project_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Project",
            id: id.into(),
        }
    }

    pub fn template_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Template",
            id: id.into(),
        }
    }
}

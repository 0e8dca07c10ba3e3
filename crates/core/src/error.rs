use thiserror::Error;

#[derive(Error, Debug)]
pub enum TempoError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Wrong expression format: {0}")]
    Format(String),

    #[error("Unexpected operand at {path}: {found}")]
    UnexpectedOperand { path: String, found: String },

    #[error("Leaf rule at {path} has {len} elements, expected 4")]
    LeafArity { path: String, len: usize },

    #[error("Unknown unit '{value}'{}", suggestion_hint(.suggestion))]
    UnknownUnit {
        value: String,
        suggestion: Option<String>,
    },

    #[error("Invalid node path: {0}")]
    InvalidPath(String),

    #[error("Editor is detached from its field")]
    Detached,

    #[error("Segment error: {0}")]
    Segment(String),

    #[error("Schedule error: {0}")]
    Schedule(String),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(", did you mean '{s}'?"))
        .unwrap_or_default()
}

/// Result alias for editor and codec operations.
pub type Result<T> = std::result::Result<T, TempoError>;

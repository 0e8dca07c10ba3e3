//! Advisory validation with structured errors and suggestions.
//!
//! Construction already rejects malformed wire values; this layer checks
//! what still decodes but makes no sense (a leaf finer than its recurrence,
//! inverted bounds, a NOT with several operands, overlapping weekdays).
//! Returns a [`ValidationResult`] with errors (block save) and warnings (advisory).

mod expression_checks;
mod schedule_checks;

pub mod fuzzy;

use serde::{Deserialize, Serialize};

use tempo_core::{EditorConfig, OperatorNode, TempoError};

use crate::codec::Decoder;
use crate::schedule::Schedule;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location, e.g. `"$.1.unit"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Record a construction failure as a root-level error.
    fn parse_failure(&mut self, err: TempoError) {
        match err {
            TempoError::UnknownUnit {
                value,
                suggestion: Some(suggestion),
            } => self.error_with_suggestion("$", format!("Unknown unit '{value}'"), suggestion),
            other => self.error("$", other.to_string()),
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a decoded expression.
pub fn validate_expression(node: &OperatorNode, config: &EditorConfig) -> ValidationResult {
    let mut result = ValidationResult::new();
    expression_checks::validate_node(node, "$", config, &mut result);
    result
}

/// Validate a weekly/monthly schedule value.
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let mut result = ValidationResult::new();
    schedule_checks::validate_schedule(schedule, &mut result);
    result
}

/// Parse a wire value and validate it. Parse errors are reported at `$`.
pub fn validate_json(raw: &str, config: &EditorConfig) -> ValidationResult {
    match Decoder::new(config.default_leaf()).parse(raw) {
        Ok(node) => validate_expression(&node, config),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.parse_failure(e);
            result
        }
    }
}

/// Parse a schedule value and validate it.
pub fn validate_schedule_json(raw: &str) -> ValidationResult {
    match serde_json::from_str::<Schedule>(raw) {
        Ok(schedule) => validate_schedule(&schedule),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("$", format!("JSON parse error: {e}"));
            result
        }
    }
}

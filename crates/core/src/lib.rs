//! Shared model for the tempo widgets: the recurrence expression tree,
//! its vocabularies, the error type and env-driven editor configuration.

pub mod config;
pub mod error;
pub mod expression;
pub mod unit;

pub use config::EditorConfig;
pub use error::*;
pub use expression::*;
pub use unit::*;

//! Wire codec for recurrence expressions.
//!
//! The wire form is a JSON array: operator nodes are `[TOKEN, operand...]`,
//! leaves are `[from, to, unit, recurrence]`. There is no type tag; the
//! shape rule in [`classify`] decides once, at decode time, which variant of
//! [`tempo_core::Expression`] a value becomes.

mod classify;
mod decode;
mod encode;

#[cfg(test)]
mod tests;

pub use self::classify::{classify, NodeClass};
pub use self::decode::{coerce_number, decode, decode_expression, parse, parse_number, Decoder};
pub(crate) use self::decode::{parse_recurrence, parse_unit};
pub use self::encode::{encode, encode_expression, encode_leaf, encode_number, to_json};

/// The set a fresh widget decodes: OR over one "no rule supplied" leaf.
pub const DEFAULT_SET: &str = r#"["OR",[]]"#;

//! Python front end.
//!
//! Turns source text into the [`crate::ast`] tree the translator consumes.

pub mod literals;
pub mod parser;

pub use parser::parse;

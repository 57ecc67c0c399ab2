//! Cafe Types - Record definitions and input parsing
//!
//! This crate contains only pure data types and the parsing rules applied to
//! raw request input, with no async runtime or database dependencies.

pub mod cafe;
pub mod form;
pub mod text;

pub use cafe::*;
pub use form::*;
pub use text::title_case;

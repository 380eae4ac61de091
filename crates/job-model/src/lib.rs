//! Job model: the typed form of a JSON layout request.
//!
//! [`parse`] turns a decoded JSON document into a [`JobDescriptor`], absorbing
//! wrong-typed optional fields as warnings and rejecting structurally broken
//! input with a [`ParseError`].

pub mod errors;
pub mod parse;
pub mod types;

pub use errors::ParseError;
pub use parse::{parse, parse_str};
pub use types::{JobDescriptor, ParsedJob, Placement, Rotation};

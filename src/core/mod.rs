//! Cross-cutting primitives shared by storage and handlers

pub mod error;

pub use error::{Error, ErrorResponse};

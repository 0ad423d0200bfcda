//! Infrastructure layer
//!
//! Implementations of the domain ports against concrete backends.

pub mod document;

//! Primitive types
//!
//! This module defines the low-level big-number type used throughout the
//! crate, and the arithmetic and logical layers operating on it.
//!
//! Primitives are fixed-size, allocation-free building blocks that provide
//! well-defined semantics and predictable behavior. They are intentionally
//! minimal and do not attempt to replicate a full-featured big-integer
//! library: there is no unbounded growth, no text formatting beyond a hex
//! dump, and no general division.

pub mod nn;

/// Fixed-capacity big number and its lifecycle tag.
///
/// These are re-exported as the primary primitive types of the crate.
pub use nn::{Nn, Validity};

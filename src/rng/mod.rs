//! Random number generation module
//!
//! Key generation needs one thing from randomness: a uniformly
//! distributed big number in the open interval `(0, q)` for a generator
//! order `q`. This module defines that seam as the [`RandomSource`] trait.
//!
//! Any `rand_core` generator that is also marked `CryptoRng` is a random
//! source through a blanket implementation, so callers plug in their
//! operating-system or deterministic generator of choice.

mod source;

pub use source::RandomSource;

//! Modular arithmetic
//!
//! This module provides modular multiplication on top of the big-number
//! primitives, using Montgomery reduction (REDC) with the CIOS algorithm.
//!
//! Two levels of API are exposed:
//! - a **Montgomery-domain** API for callers that keep values in
//!   Montgomery form across many multiplications (curve arithmetic):
//!   [`compute_redc_constants`], [`montgomery_multiply`], [`redcify`] and
//!   [`unredcify`];
//! - a **plain** API, [`modular_multiply`], computing `a * b mod p`
//!   directly for callers that do not manage the Montgomery domain.
//!
//! All multiplications run in time depending only on the word length of
//! the modulus, never on operand values.

mod redc;

pub use redc::{
    RedcConstants, compute_redc_constants, modular_multiply, montgomery_multiply, redcify,
    unredcify,
};

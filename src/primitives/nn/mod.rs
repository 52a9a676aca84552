//! Fixed-capacity big numbers
//!
//! This module defines the `Nn` type, a length-tagged unsigned integer of
//! fixed capacity, together with the arithmetic and logical layers built
//! directly on it.
//!
//! `Nn` is designed as a low-level value type rather than a full
//! big-integer abstraction: capacity is a compile-time maximum, every
//! operation reports failure explicitly, and all storage is inline.
//!
//! - `word`: word width, capacity constants and single-word helpers
//! - `core`: the `Nn` type, lifecycle, comparison and byte codec
//! - `conv`: conversions from and to native integers
//! - `arith`: addition, subtraction, multiplication and reduction
//! - `logical`: bitwise operations, shifts, rotations and bit queries
//!
//! Operations write into an explicit `out` parameter. Since Rust does not
//! allow `out` to alias an input, each operation that may be applied in
//! place also exists as an `*_assign` method on `Nn`.

pub mod arith;
mod conv;
mod core;
pub mod logical;
pub mod word;

pub use self::core::{Nn, Validity};
pub use word::{
    NN_MAX_BIT_LEN, NN_MAX_BYTE_LEN, NN_MAX_WORD_LEN, WORD_BITS, WORD_BYTES, Word, bit_len_words,
    byte_len_words, leading_zero_count,
};

//! Constant-time big numbers, Montgomery arithmetic and elliptic-curve
//! key encoding
//!
//! This crate provides the arithmetic and key-handling core of an
//! elliptic-curve library: fixed-capacity big numbers, modular
//! multiplication in the Montgomery domain, and the import, export and
//! generation of elliptic-curve keys.
//!
//! The focus is on **predictability and auditability**: no heap
//! allocation in the arithmetic, explicit failure on every fallible call,
//! and execution time that depends on operand lengths rather than operand
//! values wherever secrets may flow.
//!
//! # Module overview
//!
//! - `primitives`
//!   The `Nn` big-number type: a fixed array of machine words with an
//!   explicit active length and a validity tag. It carries the arithmetic
//!   substrate (addition, subtraction, multiplication, reduction) and the
//!   logical layer (shifts, rotations, bitwise operations, bit queries).
//!
//! - `modular`
//!   Montgomery (REDC) multiplication with the CIOS algorithm, the
//!   computation of the Montgomery constants of an odd modulus, and an
//!   ordinary modular multiplication built on top of them.
//!
//! - `keys`
//!   Private keys, public keys and key pairs bound to a signature
//!   algorithm and to borrowed curve parameters, with raw and structured
//!   encodings, public-key subgroup checks and key-pair generation.
//!
//!   Curve arithmetic itself is supplied by the caller through the
//!   `Curve` trait.
//!
//! - `rng`
//!   The random-source seam used by key generation, implemented for any
//!   `rand_core` cryptographic generator.
//!
//! # Configuration
//!
//! - `word32`: use 32-bit machine words instead of 64-bit ones.
//! - `strict-checks`: keep the costly algorithmic precondition checks
//!   (such as "operands are reduced modulo p") in release builds. They are
//!   always active in debug builds.
//!
//! # Errors
//!
//! Every fallible operation returns [`Result`]. On error no output is
//! published: the destination is left as it was, or, for keys, marked
//! invalid.

mod checks;

pub mod error;
pub mod keys;
pub mod modular;
pub mod primitives;
pub mod rng;

pub use error::{Error, Result};
pub use primitives::{Nn, Validity};

//! Key encoding.
//!
//! This module defines elliptic-curve private keys, public keys and key
//! pairs, together with their import and export in raw and structured
//! form, and key-pair generation.
//!
//! It does not implement curve arithmetic. Points are opaque values
//! produced by an implementation of the [`Curve`] trait, which the
//! caller supplies through [`EcParams`].
//!
//! ## Raw encoding
//!
//! A raw private key is the big-endian encoding of its scalar, left-padded
//! with zeros to the buffer length. A raw public key is the encoding of
//! its point chosen by the curve, in projective or affine coordinates.
//!
//! ## Structured encoding
//!
//! A structured buffer prefixes the raw encoding with a three-byte header
//! (key class, algorithm, curve identifier) which import checks against
//! the caller's expectations. See [`structured`].
//!
//! ## Subgroup check
//!
//! Importing a public key on a curve whose cofactor is not one verifies
//! that the point lies in the subgroup generated by the generator.

mod alg;
mod core;
mod params;
pub mod structured;

pub use self::alg::{KeyClass, SigAlgorithm};
pub use self::core::{KeyPair, PrivateKey, PublicKey};
pub use self::params::{Curve, CurveType, EcParams, PointForm};
pub use self::structured::METADATA_LEN;

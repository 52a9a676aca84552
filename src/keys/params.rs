//! Curve parameters consumed by keys.
//!
//! The key layer never performs curve arithmetic itself. It relies on a
//! [`Curve`] implementation for point parsing, encoding and scalar
//! multiplication, and on [`EcParams`] for the values attached to a named
//! curve: generator order, cofactor and name.

use crate::checks::must_have;
use crate::error::{Error, Result};
use crate::primitives::Nn;

/// Coordinate form of an encoded point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointForm {
    /// Projective coordinates `(X : Y : Z)`.
    Projective,

    /// Affine coordinates `(x, y)`.
    Affine,
}

/// Elliptic curve arithmetic used by the key layer.
///
/// Implementations own their field and curve constants. Every method
/// reports failure explicitly; a point that does not lie on the curve is
/// rejected with [`Error::InvalidPoint`].
pub trait Curve {
    /// Point representation used by the implementation.
    type Point: Clone;

    /// Parses a point from `buf` in the given coordinate form.
    fn import_point(&self, buf: &[u8], form: PointForm) -> Result<Self::Point>;

    /// Encodes `point` into `buf` in the given coordinate form.
    fn export_point(&self, point: &Self::Point, buf: &mut [u8], form: PointForm) -> Result<()>;

    /// Returns the generator of the prime-order subgroup.
    fn generator(&self) -> &Self::Point;

    /// Computes `k * point`.
    fn scalar_mul(&self, k: &Nn, point: &Self::Point) -> Result<Self::Point>;

    /// Returns `true` for the point at infinity.
    fn is_identity(&self, point: &Self::Point) -> Result<bool>;

    /// Returns `true` if `order * point` is the point at infinity.
    ///
    /// This is a full scalar multiplication. Implementations with a
    /// faster membership test may override it.
    fn check_order(&self, point: &Self::Point, order: &Nn) -> Result<bool> {
        let q_point = self.scalar_mul(order, point)?;

        self.is_identity(&q_point)
    }
}

/// Parameters of a named curve.
///
/// Keys borrow an `EcParams` for their whole lifetime; it is never copied
/// into them.
pub struct EcParams<C: Curve> {
    curve: C,
    order: Nn,
    cofactor: Nn,
    name: String,
}

impl<C: Curve> EcParams<C> {
    /// Binds a curve to its generator order, cofactor and name.
    ///
    /// Fails with [`Error::InvalidState`] if the order or the cofactor is
    /// not initialized, and with [`Error::InvalidArgument`] if either is
    /// zero.
    pub fn new(curve: C, order: Nn, cofactor: Nn, name: impl Into<String>) -> Result<Self> {
        must_have!(!order.is_zero()?, Error::InvalidArgument);
        must_have!(!cofactor.is_zero()?, Error::InvalidArgument);

        Ok(Self {
            curve,
            order,
            cofactor,
            name: name.into(),
        })
    }

    /// Returns the curve implementation.
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Returns the order of the generator.
    pub fn order(&self) -> &Nn {
        &self.order
    }

    /// Returns the cofactor of the generator.
    pub fn cofactor(&self) -> &Nn {
        &self.cofactor
    }

    /// Returns the curve name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the curve name to its registered identifier.
    ///
    /// Fails with [`Error::InvalidArgument`] for an unregistered name.
    pub fn curve_type(&self) -> Result<CurveType> {
        CurveType::from_name(&self.name).ok_or(Error::InvalidArgument)
    }
}

/// Registered curves and their one-byte wire identifiers.
///
/// Identifier 0 is reserved for "unknown" and never assigned.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveType {
    Frp256v1 = 1,
    Secp192r1 = 2,
    Secp224r1 = 3,
    Secp256r1 = 4,
    Secp384r1 = 5,
    Secp521r1 = 6,
    Brainpoolp224r1 = 7,
    Brainpoolp256r1 = 8,
    Brainpoolp384r1 = 9,
    Brainpoolp512r1 = 10,
    Secp256k1 = 11,
    Wei25519 = 12,
    Wei448 = 13,
}

impl CurveType {
    /// Every registered curve, in identifier order.
    pub const ALL: [CurveType; 13] = [
        Self::Frp256v1,
        Self::Secp192r1,
        Self::Secp224r1,
        Self::Secp256r1,
        Self::Secp384r1,
        Self::Secp521r1,
        Self::Brainpoolp224r1,
        Self::Brainpoolp256r1,
        Self::Brainpoolp384r1,
        Self::Brainpoolp512r1,
        Self::Secp256k1,
        Self::Wei25519,
        Self::Wei448,
    ];

    /// Returns the canonical curve name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Frp256v1 => "FRP256V1",
            Self::Secp192r1 => "SECP192R1",
            Self::Secp224r1 => "SECP224R1",
            Self::Secp256r1 => "SECP256R1",
            Self::Secp384r1 => "SECP384R1",
            Self::Secp521r1 => "SECP521R1",
            Self::Brainpoolp224r1 => "BRAINPOOLP224R1",
            Self::Brainpoolp256r1 => "BRAINPOOLP256R1",
            Self::Brainpoolp384r1 => "BRAINPOOLP384R1",
            Self::Brainpoolp512r1 => "BRAINPOOLP512R1",
            Self::Secp256k1 => "SECP256K1",
            Self::Wei25519 => "WEI25519",
            Self::Wei448 => "WEI448",
        }
    }

    /// Looks up a curve by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Looks up a curve by its wire identifier.
    pub fn from_u8(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|&c| c as u8 == id)
    }
}

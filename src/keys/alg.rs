//! Algorithm and key-class tags.

use tracing::debug;

use crate::checks::must_have;
use crate::error::{Error, Result};
use crate::primitives::Nn;
use crate::primitives::nn::arith::sub;
use crate::primitives::nn::logical::and;

/// Signature algorithm a key is bound to, with its one-byte wire tag.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SigAlgorithm {
    Ecdsa = 1,
    Eckcdsa = 2,
    Ecsdsa = 3,
    Ecosdsa = 4,
    Ecfsdsa = 5,
    Ecgdsa = 6,
    Ecrdsa = 7,
    Sm2 = 8,
    Eddsa25519 = 9,
    Eddsa25519ctx = 10,
    Eddsa25519ph = 11,
    Eddsa448 = 12,
    Eddsa448ph = 13,
    Decdsa = 14,
}

impl SigAlgorithm {
    /// Every known algorithm, in tag order.
    pub const ALL: [SigAlgorithm; 14] = [
        Self::Ecdsa,
        Self::Eckcdsa,
        Self::Ecsdsa,
        Self::Ecosdsa,
        Self::Ecfsdsa,
        Self::Ecgdsa,
        Self::Ecrdsa,
        Self::Sm2,
        Self::Eddsa25519,
        Self::Eddsa25519ctx,
        Self::Eddsa25519ph,
        Self::Eddsa448,
        Self::Eddsa448ph,
        Self::Decdsa,
    ];

    /// Looks up an algorithm by its wire tag.
    pub fn from_u8(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|&a| a as u8 == tag)
    }

    /// Returns `true` for the EdDSA family.
    pub fn is_eddsa(self) -> bool {
        matches!(
            self,
            Self::Eddsa25519
                | Self::Eddsa25519ctx
                | Self::Eddsa25519ph
                | Self::Eddsa448
                | Self::Eddsa448ph
        )
    }

    /// Adjusts a freshly drawn private scalar for this algorithm.
    ///
    /// EdDSA-family algorithms clear the low bits of the scalar so that it
    /// is a multiple of the cofactor, which must then be a power of two.
    /// Other algorithms use the scalar as drawn.
    pub fn post_process_private(self, x: &mut Nn, cofactor: &Nn) -> Result<()> {
        x.check_initialized()?;

        if !self.is_eddsa() {
            return Ok(());
        }

        must_have!(!cofactor.is_zero()?, Error::InvalidArgument);

        let mut low = Nn::new();
        sub(&mut low, cofactor, &Nn::one())?;

        let mut overlap = Nn::new();
        and(&mut overlap, cofactor, &low)?;
        if !overlap.is_zero()? {
            debug!(alg = ?self, "cofactor is not a power of two");
            return Err(Error::InvalidArgument);
        }

        low.set_wlen(x.wlen())?;
        low.not_assign()?;
        x.and_assign(&low)
    }
}

/// Class of an encoded key, first byte of a structured buffer.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    Public = 0,
    Private = 1,
}

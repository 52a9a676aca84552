//! Random big numbers modulo a bound

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::checks::must_have;
use crate::error::{Error, Result};
use crate::primitives::nn::arith::{add, reduce, sub};
use crate::primitives::nn::logical::bit_length;
use crate::primitives::nn::{NN_MAX_BYTE_LEN, Nn};

/// Number of extra random bits drawn above the bit length of the bound.
///
/// The statistical distance of the reduced value to the uniform
/// distribution is below `2^-EXTRA_BITS`.
const EXTRA_BITS: usize = 128;

/// Source of uniformly distributed big numbers.
pub trait RandomSource {
    /// Writes into `out` a uniformly distributed value in `(0, q)`.
    ///
    /// `q` must be at least 2. On failure `out` is left untouched.
    fn random_mod(&mut self, out: &mut Nn, q: &Nn) -> Result<()>;
}

/// Reduction of a wide random value.
///
/// `bitlen(q) + 128` random bits are reduced modulo `q - 1` and one is
/// added, giving a value in `[1, q - 1]` with negligible bias and without
/// any rejection loop.
impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn random_mod(&mut self, out: &mut Nn, q: &Nn) -> Result<()> {
        q.check_initialized()?;

        let one = Nn::one();
        must_have!(q.compare(&one)?.is_gt(), Error::InvalidArgument);

        let len = (bit_length(q)? + EXTRA_BITS).div_ceil(8);
        must_have!(len <= NN_MAX_BYTE_LEN, Error::CapacityExceeded);

        let mut buf = [0u8; NN_MAX_BYTE_LEN];
        let filled = self.try_fill_bytes(&mut buf[..len]);
        let wide = filled
            .map_err(|_| Error::RandomSource)
            .and_then(|_| Nn::from_be_bytes(&buf[..len]));
        buf.zeroize();
        let wide = wide?;

        let mut q_minus_one = Nn::new();
        sub(&mut q_minus_one, q, &one)?;

        let mut reduced = Nn::new();
        reduce(&mut reduced, &wide, &q_minus_one)?;

        add(out, &reduced, &one)
    }
}

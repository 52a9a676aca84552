//! Conversions between `Nn` and native integers
//!
//! Small values are the usual way to build constants (one, small moduli,
//! test operands). Conversions into `Nn` always succeed and produce an
//! initialized value whose active length is the number of words needed
//! for the source type. Conversions back fail on uninitialized inputs and
//! on values that do not fit without truncation.

use super::Nn;
use super::word::{WORD_BITS, Word, bit_len_words};
use crate::error::{Error, Result};

macro_rules! impl_from_native {
    ($($t:ty),*) => {
        $(
            /// Converts a native integer into an initialized `Nn`.
            impl From<$t> for Nn {
                fn from(value: $t) -> Self {
                    let mut out = Nn::zero();
                    let wlen = bit_len_words(<$t>::BITS as usize);
                    let mut v = value as u128;

                    for w in out.val[..wlen].iter_mut() {
                        *w = v as Word;
                        v = v.checked_shr(WORD_BITS as u32).unwrap_or(0);
                    }
                    out.wlen = wlen;

                    out
                }
            }
        )*
    };
}

impl_from_native!(u8, u16, u32, u64, u128);

/// Attempts to convert an `Nn` into a `u64`.
///
/// The conversion succeeds only if all bits above the lowest 64 are zero.
impl TryFrom<&Nn> for u64 {
    type Error = Error;

    fn try_from(value: &Nn) -> Result<Self> {
        let wide = u128::try_from(value)?;

        u64::try_from(wide).map_err(|_| Error::CapacityExceeded)
    }
}

/// Attempts to convert an `Nn` into a `u128`.
///
/// The conversion succeeds only if all bits above the lowest 128 are zero.
impl TryFrom<&Nn> for u128 {
    type Error = Error;

    fn try_from(value: &Nn) -> Result<Self> {
        value.check_initialized()?;

        let low = bit_len_words(128).min(value.wlen);
        if value.val[low..value.wlen].iter().any(|&w| w != 0) {
            return Err(Error::CapacityExceeded);
        }

        let out = value.val[..low]
            .iter()
            .enumerate()
            .fold(0u128, |acc, (i, &w)| acc | ((w as u128) << (i * WORD_BITS)));

        Ok(out)
    }
}

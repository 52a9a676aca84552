//! Fixed-capacity big number
//!
//! This module defines `Nn`, the big-number value type used by every
//! other layer of the crate.
//!
//! It is designed as a **length-tagged value type**: a fixed array of
//! machine words, an explicit count of active words (`wlen`), and a
//! validity tag. There is no heap allocation and no implicit growth; the
//! capacity is fixed at `NN_MAX_BIT_LEN` bits for every instance.
//!
//! Words are stored little-endian (index 0 is least significant). Words
//! at and above `wlen` are kept at zero by every routine of this crate.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter};

use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::word::{
    NN_MAX_BYTE_LEN, NN_MAX_WORD_LEN, WORD_BITS, WORD_BYTES, Word, byte_len_words,
    leading_zero_count,
};
use crate::checks::must_have;
use crate::error::{Error, Result};

/// Lifecycle state of a big number or key.
///
/// Construction failures move a value to `Invalidated` rather than back to
/// `Uninitialized`, so reuse after a failed operation is refused the same
/// way as use of a value that was never set up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validity {
    /// Fresh value, never initialized.
    #[default]
    Uninitialized,

    /// Usable value.
    Initialized,

    /// A construction step failed; the value must not be used.
    Invalidated,
}

/// Fixed-capacity, length-tagged unsigned big number.
///
/// The value is `sum(val[i] << (i * WORD_BITS))` for `i < wlen`.
#[derive(Clone)]
pub struct Nn {
    pub(crate) val: [Word; NN_MAX_WORD_LEN],
    pub(crate) wlen: usize,
    pub(crate) state: Validity,
}

impl Nn {
    /// Returns a fresh, uninitialized big number.
    ///
    /// Every operation refuses it as an input until it is initialized.
    pub const fn new() -> Self {
        Self {
            val: [0; NN_MAX_WORD_LEN],
            wlen: 0,
            state: Validity::Uninitialized,
        }
    }

    /// Returns an initialized zero with no active words.
    pub const fn zero() -> Self {
        Self {
            val: [0; NN_MAX_WORD_LEN],
            wlen: 0,
            state: Validity::Initialized,
        }
    }

    /// Returns an initialized zero with `wlen` active words.
    pub fn with_wlen(wlen: usize) -> Result<Self> {
        must_have!(wlen <= NN_MAX_WORD_LEN, Error::CapacityExceeded);

        let mut out = Self::zero();
        out.wlen = wlen;

        Ok(out)
    }

    /// Returns the value one, on a single word.
    pub fn one() -> Self {
        let mut out = Self::zero();
        out.val[0] = 1;
        out.wlen = 1;

        out
    }

    /// (Re)initializes `self` to zero with `wlen` active words.
    ///
    /// All backing words are cleared, including those above `wlen`.
    pub fn init(&mut self, wlen: usize) -> Result<()> {
        must_have!(wlen <= NN_MAX_WORD_LEN, Error::CapacityExceeded);

        self.val.zeroize();
        self.wlen = wlen;
        self.state = Validity::Initialized;

        Ok(())
    }

    /// Wipes the backing words and clears the validity tag.
    pub fn uninit(&mut self) {
        self.zeroize();
    }

    /// Marks a value as the product of a failed construction.
    pub(crate) fn invalidate(&mut self) {
        self.zeroize();
        self.state = Validity::Invalidated;
    }

    /// Fails with [`Error::InvalidState`] unless the value is initialized.
    #[inline]
    pub fn check_initialized(&self) -> Result<()> {
        must_have!(self.state == Validity::Initialized, Error::InvalidState);

        Ok(())
    }

    /// Returns the validity tag.
    pub fn validity(&self) -> Validity {
        self.state
    }

    /// Returns the number of active words.
    pub fn wlen(&self) -> usize {
        self.wlen
    }

    /// Returns the active words, least significant first.
    pub fn words(&self) -> &[Word] {
        &self.val[..self.wlen]
    }

    /// Changes the number of active words.
    ///
    /// Growing exposes zero words. Shrinking discards the words above the
    /// new length and clears them.
    pub fn set_wlen(&mut self, wlen: usize) -> Result<()> {
        self.check_initialized()?;
        must_have!(wlen <= NN_MAX_WORD_LEN, Error::CapacityExceeded);

        self.val[wlen..].iter_mut().for_each(|w| *w = 0);
        self.wlen = wlen;

        Ok(())
    }

    /// Drops leading zero words from the active length.
    ///
    /// This reveals the word length of the value and is not constant-time.
    pub fn normalize(&mut self) -> Result<()> {
        self.check_initialized()?;

        while self.wlen > 0 && self.val[self.wlen - 1] == 0 {
            self.wlen -= 1;
        }

        Ok(())
    }

    /// Copies value, length and state from `other`.
    pub fn copy_from(&mut self, other: &Nn) -> Result<()> {
        other.check_initialized()?;

        self.val = other.val;
        self.wlen = other.wlen;
        self.state = Validity::Initialized;

        Ok(())
    }

    /// Returns `true` if the value is zero, whatever its active length.
    pub fn is_zero(&self) -> Result<bool> {
        self.check_initialized()?;

        let acc = self.val[..self.wlen].iter().fold(0, |acc, w| acc | w);

        Ok(acc == 0)
    }

    /// Returns `true` if the value is one, whatever its active length.
    ///
    /// A zero-length value is zero, never one.
    pub fn is_one(&self) -> Result<bool> {
        self.check_initialized()?;

        if self.wlen == 0 {
            return Ok(false);
        }

        let high = self.val[1..self.wlen].iter().fold(0, |acc, w| acc | w);

        Ok((high | (self.val[0] ^ 1)) == 0)
    }

    /// Returns `true` if the lowest bit is set.
    pub fn is_odd(&self) -> Result<bool> {
        self.check_initialized()?;

        Ok(self.wlen > 0 && (self.val[0] & 1) == 1)
    }

    /// Constant-time three-way comparison of the values.
    ///
    /// Runs over the larger of the two active lengths; operands of
    /// different lengths compare by value.
    pub fn compare(&self, other: &Nn) -> Result<Ordering> {
        self.check_initialized()?;
        other.check_initialized()?;

        let n = self.wlen.max(other.wlen);
        let (gt, lt) = ct_cmp_words(&self.val[..n], &other.val[..n]);

        Ok(if bool::from(gt) {
            Ordering::Greater
        } else if bool::from(lt) {
            Ordering::Less
        } else {
            Ordering::Equal
        })
    }

    /// Counts the leading zero bits within the active words.
    ///
    /// This scans from the most significant active word and stops at the
    /// first non-zero one. It is not constant-time.
    pub fn leading_zeros(&self) -> Result<usize> {
        self.check_initialized()?;

        let mut count = 0usize;

        for &w in self.val[..self.wlen].iter().rev() {
            if w == 0 {
                count += WORD_BITS;
            } else {
                count += leading_zero_count(w) as usize;
                break;
            }
        }

        Ok(count)
    }

    /// Loads a big-endian byte buffer.
    ///
    /// The active length is the number of words needed for the buffer
    /// length, not for the value: leading zero bytes are kept as width.
    pub fn from_be_bytes(buf: &[u8]) -> Result<Self> {
        must_have!(buf.len() <= NN_MAX_BYTE_LEN, Error::CapacityExceeded);

        let mut out = Self::with_wlen(byte_len_words(buf.len()))?;

        for (i, &byte) in buf.iter().rev().enumerate() {
            out.val[i / WORD_BYTES] |= (byte as Word) << (8 * (i % WORD_BYTES));
        }

        Ok(out)
    }

    /// Writes the value as big-endian bytes, left-padded with zeros.
    ///
    /// Fails if the value needs more bits than the buffer holds.
    pub fn to_be_bytes(&self, buf: &mut [u8]) -> Result<()> {
        let bits = super::logical::bit_length(self)?;
        must_have!(bits <= 8 * buf.len(), Error::BufferTooShort);

        let len = buf.len();
        for (i, byte) in buf.iter_mut().enumerate() {
            let pos = len - 1 - i;
            let widx = pos / WORD_BYTES;

            *byte = if widx < self.wlen {
                (self.val[widx] >> (8 * (pos % WORD_BYTES))) as u8
            } else {
                0
            };
        }

        Ok(())
    }
}

/// Compares two equally long word slices from the top, in constant time.
///
/// Returns `(greater, less)`.
pub(crate) fn ct_cmp_words(a: &[Word], b: &[Word]) -> (Choice, Choice) {
    let mut gt = Choice::from(0);
    let mut lt = Choice::from(0);

    for (x, y) in a.iter().zip(b.iter()).rev() {
        let decided = gt | lt;
        gt |= !decided & x.ct_gt(y);
        lt |= !decided & y.ct_gt(x);
    }

    (gt, lt)
}

impl Default for Nn {
    fn default() -> Self {
        Self::new()
    }
}

impl Zeroize for Nn {
    fn zeroize(&mut self) {
        self.val.zeroize();
        self.wlen = 0;
        self.state = Validity::Uninitialized;
    }
}

impl Drop for Nn {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Nn {}

impl ConstantTimeEq for Nn {
    /// Value equality over the larger active length.
    fn ct_eq(&self, other: &Self) -> Choice {
        let n = self.wlen.max(other.wlen);

        self.val[..n].ct_eq(&other.val[..n])
    }
}

impl PartialEq for Nn {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && bool::from(self.ct_eq(other))
    }
}

impl Eq for Nn {}

impl Display for Nn {
    /// Formats the active words as colon-separated, big-endian hex bytes.
    ///
    /// Example:
    /// `00:00:00:00:00:00:01:2C`
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for w in self.val[..self.wlen].iter().rev() {
            for byte in w.to_be_bytes() {
                if !first {
                    f.write_str(":")?;
                }
                first = false;

                write!(f, "{:02X}", byte)?;
            }
        }

        Ok(())
    }
}

impl Debug for Nn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nn")
            .field("wlen", &self.wlen)
            .field("state", &self.state)
            .field("value", &format_args!("{}", self))
            .finish()
    }
}

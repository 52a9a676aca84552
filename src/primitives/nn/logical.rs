//! Logical and shift operations for `Nn`
//!
//! This module implements bitwise AND/OR/XOR/NOT, logical shifts, rotations
//! and bit-level queries.
//!
//! All operations require initialized inputs and fail with
//! [`Error::InvalidState`] otherwise. Their execution time depends on the
//! active lengths of the operands and on the shift counts, never on the
//! operand values, with two documented exceptions: [`bit_length`] and the
//! length-adapting shifts, which derive the output length from the bit
//! length of the input.
//!
//! ## Shifts
//!
//! Each shift comes in two forms:
//! - a *length-adapting* form ([`shift_left`], [`shift_right`]) that sizes
//!   the output to exactly fit the result, capped at `NN_MAX_BIT_LEN`;
//! - a *fixed-length* form ([`shift_left_fixedlen`],
//!   [`shift_right_fixedlen`]) that keeps the caller's preset `out.wlen`
//!   as a window, silently dropping bits shifted outside of it.
//!
//! Output words are built as `hi | lo`, where `hi` is the source word at
//! the word offset shifted by `count % WORD_BITS`, and `lo` is the adjacent
//! source word shifted the complementary way. Left shifts walk the output
//! from the top and right shifts from the bottom, so each output word only
//! reads source words that have not been overwritten yet. This is what
//! makes the in-place (`*_assign`) forms safe.

use super::Nn;
use super::word::{
    NN_MAX_BIT_LEN, NN_MAX_WORD_LEN, WORD_BITS, Word, bit_len_words, leading_zero_count, wlshift,
    wrshift,
};
use crate::checks::must_have;
use crate::error::{Error, Result};

fn lshift_words(val: &mut [Word; NN_MAX_WORD_LEN], iwlen: usize, owlen: usize, count: usize) {
    let dec = count / WORD_BITS;
    let hshift = count % WORD_BITS;
    let lshift = WORD_BITS - hshift;

    for opos in (0..owlen).rev() {
        let mut hipart: Word = 0;
        let mut lopart: Word = 0;

        if let Some(ipos) = opos.checked_sub(dec + 1) {
            if ipos < iwlen {
                lopart = wrshift(val[ipos], lshift);
            }
        }

        if let Some(ipos) = opos.checked_sub(dec) {
            if ipos < iwlen {
                hipart = wlshift(val[ipos], hshift);
            }
        }

        val[opos] = hipart | lopart;
    }
}

fn rshift_words(val: &mut [Word; NN_MAX_WORD_LEN], iwlen: usize, owlen: usize, count: usize) {
    let dec = count / WORD_BITS;
    let lshift = count % WORD_BITS;
    let hshift = WORD_BITS - lshift;

    for opos in 0..owlen {
        let mut hipart: Word = 0;
        let mut lopart: Word = 0;

        let ipos = opos.saturating_add(dec);
        if ipos < iwlen {
            lopart = wrshift(val[ipos], lshift);
        }

        let ipos = ipos.saturating_add(1);
        if ipos < iwlen {
            hipart = wlshift(val[ipos], hshift);
        }

        val[opos] = hipart | lopart;
    }
}

/// Clears every backing word at or above `from`.
fn clear_above(val: &mut [Word; NN_MAX_WORD_LEN], from: usize) {
    val[from..].iter_mut().for_each(|w| *w = 0);
}

/// Left shift `out = input << count` with an adapted output length.
///
/// The output spans the words needed for `bit_length(input) + count`
/// bits, capped at the capacity; bits beyond the capacity are lost.
pub fn shift_left(out: &mut Nn, input: &Nn, count: usize) -> Result<()> {
    input.check_initialized()?;

    let owlen = bit_len_words(count.saturating_add(bit_length(input)?)).min(NN_MAX_WORD_LEN);

    out.val = input.val;
    lshift_words(&mut out.val, input.wlen, owlen, count);
    clear_above(&mut out.val, owlen);
    out.wlen = owlen;
    out.state = input.state;

    Ok(())
}

/// Left shift `out = input << count` within the preset `out.wlen` window.
///
/// `out` must be initialized since its active length is trusted. Bits
/// shifted above the window are lost and the window is not changed.
pub fn shift_left_fixedlen(out: &mut Nn, input: &Nn, count: usize) -> Result<()> {
    input.check_initialized()?;
    out.check_initialized()?;

    let owlen = out.wlen;

    out.val = input.val;
    lshift_words(&mut out.val, input.wlen, owlen, count);
    clear_above(&mut out.val, owlen);

    Ok(())
}

/// Right shift `out = input >> count` with an adapted output length.
///
/// The output spans the words needed for `bit_length(input) - count` bits,
/// or no words when everything is shifted out.
pub fn shift_right(out: &mut Nn, input: &Nn, count: usize) -> Result<()> {
    input.check_initialized()?;

    let bits = bit_length(input)?;
    let owlen = if count > bits {
        0
    } else {
        bit_len_words(bits - count)
    };

    out.val = input.val;
    rshift_words(&mut out.val, input.wlen, owlen, count);
    clear_above(&mut out.val, owlen);
    out.wlen = owlen;
    out.state = input.state;

    Ok(())
}

/// Right shift `out = input >> count` within the preset `out.wlen` window.
///
/// `out` must be initialized since its active length is trusted. Zeros are
/// shifted in from the top of the window.
pub fn shift_right_fixedlen(out: &mut Nn, input: &Nn, count: usize) -> Result<()> {
    input.check_initialized()?;
    out.check_initialized()?;

    let owlen = out.wlen;

    out.val = input.val;
    rshift_words(&mut out.val, input.wlen, owlen, count);
    clear_above(&mut out.val, owlen);

    Ok(())
}

/// Keeps only the low `bitlen` bits of a value spanning
/// `bit_len_words(bitlen)` words.
fn mask_top_word(out: &mut Nn, bitlen: usize) {
    if bitlen % WORD_BITS != 0 && out.wlen > 0 {
        let mask: Word = ((1 as Word) << (bitlen % WORD_BITS)) - 1;
        out.val[out.wlen - 1] &= mask;
    }
}

/// `(window << lcount) ^ (window >> rcount)` where `window` is `input`
/// reduced to its low `bitlen` bits.
fn rotate(out: &mut Nn, input: &Nn, lcount: usize, rcount: usize, bitlen: usize) -> Result<()> {
    let owlen = bit_len_words(bitlen);

    let mut window = input.clone();
    window.set_wlen(owlen)?;
    mask_top_word(&mut window, bitlen);

    let mut tmp = Nn::zero();
    shift_left(&mut tmp, &window, lcount)?;
    tmp.set_wlen(owlen)?;
    shift_right(out, &window, rcount)?;
    out.set_wlen(owlen)?;
    out.xor_assign(&tmp)?;
    mask_top_word(out, bitlen);

    Ok(())
}

/// Left rotation of the low `bitlen` bits of `input` by `count`.
///
/// Computed as `(x << count) ^ (x >> (bitlen - count))` where `x` is
/// `input mod 2^bitlen`. Requires `count < bitlen <= NN_MAX_BIT_LEN`. The
/// output spans `bit_len_words(bitlen)` words.
pub fn rotate_left(out: &mut Nn, input: &Nn, count: usize, bitlen: usize) -> Result<()> {
    must_have!(bitlen <= NN_MAX_BIT_LEN, Error::InvalidArgument);
    must_have!(count < bitlen, Error::InvalidArgument);
    input.check_initialized()?;

    rotate(out, input, count, bitlen - count, bitlen)
}

/// Right rotation of the low `bitlen` bits of `input` by `count`.
///
/// Computed as `(x >> count) ^ (x << (bitlen - count))` where `x` is
/// `input mod 2^bitlen`. Requires `count < bitlen <= NN_MAX_BIT_LEN`. The
/// output spans `bit_len_words(bitlen)` words.
pub fn rotate_right(out: &mut Nn, input: &Nn, count: usize, bitlen: usize) -> Result<()> {
    must_have!(bitlen <= NN_MAX_BIT_LEN, Error::InvalidArgument);
    must_have!(count < bitlen, Error::InvalidArgument);
    input.check_initialized()?;

    rotate(out, input, bitlen - count, count, bitlen)
}

fn bitwise(out: &mut Nn, b: &Nn, c: &Nn, op: impl Fn(Word, Word) -> Word) -> Result<()> {
    b.check_initialized()?;
    c.check_initialized()?;

    let wlen = b.wlen.max(c.wlen);
    out.init(wlen)?;

    for i in 0..wlen {
        out.val[i] = op(b.val[i], c.val[i]);
    }

    Ok(())
}

/// Bitwise XOR `out = b ^ c`, spanning the larger active length.
pub fn xor(out: &mut Nn, b: &Nn, c: &Nn) -> Result<()> {
    bitwise(out, b, c, |x, y| x ^ y)
}

/// Bitwise OR `out = b | c`, spanning the larger active length.
pub fn or(out: &mut Nn, b: &Nn, c: &Nn) -> Result<()> {
    bitwise(out, b, c, |x, y| x | y)
}

/// Bitwise AND `out = b & c`, spanning the larger active length.
pub fn and(out: &mut Nn, b: &Nn, c: &Nn) -> Result<()> {
    bitwise(out, b, c, |x, y| x & y)
}

/// Bitwise NOT `out = !b` over the active words of `b`.
pub fn not(out: &mut Nn, b: &Nn) -> Result<()> {
    b.check_initialized()?;

    out.init(b.wlen)?;

    for i in 0..b.wlen {
        out.val[i] = !b.val[i];
    }

    Ok(())
}

/// Number of significant bits of `input`; zero for a zero value.
///
/// Scans down from the most significant active word and stops at the first
/// non-zero one. This is **not** constant-time: it reveals the position of
/// the highest set bit, which correct callers only apply to public values.
pub fn bit_length(input: &Nn) -> Result<usize> {
    input.check_initialized()?;

    for i in (1..=input.wlen).rev() {
        let w = input.val[i - 1];

        if w != 0 {
            return Ok(i * WORD_BITS - leading_zero_count(w) as usize);
        }
    }

    Ok(0)
}

/// Returns bit `index` of `input` (0 or 1).
///
/// Indices up to the capacity are accepted; bits above the active length
/// read as zero.
pub fn get_bit(input: &Nn, index: usize) -> Result<u8> {
    input.check_initialized()?;
    must_have!(index < NN_MAX_BIT_LEN, Error::InvalidArgument);

    let w = input.val[index / WORD_BITS];

    Ok(((w >> (index % WORD_BITS)) & 1) as u8)
}

impl Nn {
    /// `self <<= count`, adapting the active length.
    pub fn shift_left_assign(&mut self, count: usize) -> Result<()> {
        self.check_initialized()?;

        let iwlen = self.wlen;
        let owlen = bit_len_words(count.saturating_add(bit_length(self)?)).min(NN_MAX_WORD_LEN);

        lshift_words(&mut self.val, iwlen, owlen, count);
        clear_above(&mut self.val, owlen);
        self.wlen = owlen;

        Ok(())
    }

    /// `self >>= count`, adapting the active length.
    pub fn shift_right_assign(&mut self, count: usize) -> Result<()> {
        self.check_initialized()?;

        let iwlen = self.wlen;
        let bits = bit_length(self)?;
        let owlen = if count > bits {
            0
        } else {
            bit_len_words(bits - count)
        };

        rshift_words(&mut self.val, iwlen, owlen, count);
        clear_above(&mut self.val, owlen);
        self.wlen = owlen;

        Ok(())
    }

    /// `self <<= count` within the current active length.
    pub fn shift_left_fixedlen_assign(&mut self, count: usize) -> Result<()> {
        self.check_initialized()?;

        let wlen = self.wlen;
        lshift_words(&mut self.val, wlen, wlen, count);

        Ok(())
    }

    /// `self >>= count` within the current active length.
    pub fn shift_right_fixedlen_assign(&mut self, count: usize) -> Result<()> {
        self.check_initialized()?;

        let wlen = self.wlen;
        rshift_words(&mut self.val, wlen, wlen, count);

        Ok(())
    }

    /// Rotates the low `bitlen` bits of `self` left by `count`.
    pub fn rotate_left_assign(&mut self, count: usize, bitlen: usize) -> Result<()> {
        let src = self.clone();

        rotate_left(self, &src, count, bitlen)
    }

    /// Rotates the low `bitlen` bits of `self` right by `count`.
    pub fn rotate_right_assign(&mut self, count: usize, bitlen: usize) -> Result<()> {
        let src = self.clone();

        rotate_right(self, &src, count, bitlen)
    }

    /// `self ^= other`, spanning the larger active length.
    pub fn xor_assign(&mut self, other: &Nn) -> Result<()> {
        self.bitwise_assign(other, |x, y| x ^ y)
    }

    /// `self |= other`, spanning the larger active length.
    pub fn or_assign(&mut self, other: &Nn) -> Result<()> {
        self.bitwise_assign(other, |x, y| x | y)
    }

    /// `self &= other`, spanning the larger active length.
    pub fn and_assign(&mut self, other: &Nn) -> Result<()> {
        self.bitwise_assign(other, |x, y| x & y)
    }

    /// `self = !self` over the active words.
    pub fn not_assign(&mut self) -> Result<()> {
        self.check_initialized()?;

        for w in self.val[..self.wlen].iter_mut() {
            *w = !*w;
        }

        Ok(())
    }

    fn bitwise_assign(&mut self, other: &Nn, op: impl Fn(Word, Word) -> Word) -> Result<()> {
        self.check_initialized()?;
        other.check_initialized()?;

        let wlen = self.wlen.max(other.wlen);

        for i in 0..wlen {
            self.val[i] = op(self.val[i], other.val[i]);
        }
        self.wlen = wlen;

        Ok(())
    }
}

//! Arithmetic substrate for `Nn`
//!
//! This module implements the arithmetic the Montgomery and key layers are
//! built from: addition, subtraction, conditional subtraction, schoolbook
//! multiplication, reduction modulo `p`, modular addition and subtraction,
//! and the inverse of a word modulo `2^WORD_BITS`.
//!
//! It is **not** a general-purpose big-integer library. There is no
//! quotient-producing division: `reduce` only yields `a mod p`.
//!
//! Unless stated otherwise, execution time depends on the active lengths
//! of the operands and never on their values. Carries and borrows are
//! folded arithmetically and selections go through `subtle`.

use subtle::{Choice, ConditionallySelectable};

use super::Nn;
use super::word::{DWord, NN_MAX_WORD_LEN, WORD_BITS, Word};
use crate::checks::{must_have, should_have};
use crate::error::{Error, Result};

/// `acc += b`, propagating the carry through all of `acc`.
///
/// `b` may be shorter than `acc`. Returns the outgoing carry.
pub(crate) fn adc_assign(acc: &mut [Word], b: &[Word]) -> Word {
    let mut carry: Word = 0;

    for (i, a) in acc.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0);
        let t = *a as DWord + rhs as DWord + carry as DWord;
        *a = t as Word;
        carry = (t >> WORD_BITS) as Word;
    }

    carry
}

/// `acc -= b`, propagating the borrow through all of `acc`.
///
/// `b` may be shorter than `acc`. Returns the outgoing borrow.
pub(crate) fn sbb_assign(acc: &mut [Word], b: &[Word]) -> Word {
    cnd_sbb_assign(acc, b, Choice::from(1))
}

/// `acc -= b` when `choice` is set, `acc -= 0` otherwise.
///
/// Both branches run the same instructions. Returns the outgoing borrow.
pub(crate) fn cnd_sbb_assign(acc: &mut [Word], b: &[Word], choice: Choice) -> Word {
    let mask = Word::conditional_select(&0, &Word::MAX, choice);
    let mut borrow: Word = 0;

    for (i, a) in acc.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0) & mask;
        let t = (*a as DWord)
            .wrapping_sub(rhs as DWord)
            .wrapping_sub(borrow as DWord);
        *a = t as Word;
        borrow = ((t >> WORD_BITS) as Word) & 1;
    }

    borrow
}

/// `acc += b` when `choice` is set. Returns the outgoing carry.
pub(crate) fn cnd_adc_assign(acc: &mut [Word], b: &[Word], choice: Choice) -> Word {
    let mask = Word::conditional_select(&0, &Word::MAX, choice);
    let mut carry: Word = 0;

    for (i, a) in acc.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0) & mask;
        let t = *a as DWord + rhs as DWord + carry as DWord;
        *a = t as Word;
        carry = (t >> WORD_BITS) as Word;
    }

    carry
}

/// Replaces `acc` with `other` when `choice` is set.
pub(crate) fn cnd_assign_words(acc: &mut [Word], other: &[Word], choice: Choice) {
    for (a, o) in acc.iter_mut().zip(other.iter()) {
        a.conditional_assign(o, choice);
    }
}

/// Computes `out = b + c`.
///
/// The output spans the larger active length, plus one word when the sum
/// carries out of it.
pub fn add(out: &mut Nn, b: &Nn, c: &Nn) -> Result<()> {
    b.check_initialized()?;
    c.check_initialized()?;

    let n = b.wlen.max(c.wlen);
    let mut sum = b.clone();
    sum.wlen = n;

    let carry = adc_assign(&mut sum.val[..n], &c.val[..n]);
    if carry != 0 {
        must_have!(n < NN_MAX_WORD_LEN, Error::CapacityExceeded);
        sum.val[n] = carry;
        sum.wlen = n + 1;
    }

    out.copy_from(&sum)
}

/// Computes `out = b - c` modulo `2^(WORD_BITS * max(wlen))`.
///
/// Callers wanting the integer difference must ensure `b >= c`.
pub fn sub(out: &mut Nn, b: &Nn, c: &Nn) -> Result<()> {
    cnd_sub(true, out, b, c)
}

/// Computes `out = b - c` if `cond` holds, `out = b` otherwise.
///
/// Both cases execute the same word operations; the output always spans
/// the larger active length.
pub fn cnd_sub(cond: bool, out: &mut Nn, b: &Nn, c: &Nn) -> Result<()> {
    b.check_initialized()?;
    c.check_initialized()?;

    let n = b.wlen.max(c.wlen);
    let mut diff = b.clone();
    diff.wlen = n;

    cnd_sbb_assign(&mut diff.val[..n], &c.val[..n], Choice::from(cond as u8));

    out.copy_from(&diff)
}

/// Schoolbook product `out = b * c`.
///
/// The output spans `b.wlen + c.wlen` words, which must fit in the
/// capacity.
pub fn mul(out: &mut Nn, b: &Nn, c: &Nn) -> Result<()> {
    b.check_initialized()?;
    c.check_initialized()?;

    let wlen = b.wlen + c.wlen;
    must_have!(wlen <= NN_MAX_WORD_LEN, Error::CapacityExceeded);

    let mut prod = Nn::with_wlen(wlen)?;

    for (i, &bi) in b.val[..b.wlen].iter().enumerate() {
        let mut carry: Word = 0;

        for (j, &cj) in c.val[..c.wlen].iter().enumerate() {
            let t = prod.val[i + j] as DWord + bi as DWord * cj as DWord + carry as DWord;
            prod.val[i + j] = t as Word;
            carry = (t >> WORD_BITS) as Word;
        }

        prod.val[i + c.wlen] = carry;
    }

    out.copy_from(&prod)
}

/// Square `out = b * b`.
pub fn sqr(out: &mut Nn, b: &Nn) -> Result<()> {
    mul(out, b, b)
}

/// Reduction `out = a mod p` by shift-and-subtract.
///
/// The bits of `a` are fed one by one into a remainder one word wider than
/// `p`, with a constant-time conditional subtraction of `p` after each
/// step. The loop count depends on `a.wlen` and `p.wlen` only. The output
/// spans `p.wlen` words.
pub fn reduce(out: &mut Nn, a: &Nn, p: &Nn) -> Result<()> {
    a.check_initialized()?;
    p.check_initialized()?;
    must_have!(!p.is_zero()?, Error::InvalidArgument);

    let plen = p.wlen;
    let width = plen + 1;
    must_have!(width <= NN_MAX_WORD_LEN, Error::CapacityExceeded);

    let mut rem = Nn::with_wlen(width)?;
    let mut diff = Nn::with_wlen(width)?;

    for i in (0..a.wlen * WORD_BITS).rev() {
        let mut carry = (a.val[i / WORD_BITS] >> (i % WORD_BITS)) & 1;

        for w in rem.val[..width].iter_mut() {
            let top = *w >> (WORD_BITS - 1);
            *w = (*w << 1) | carry;
            carry = top;
        }

        diff.val = rem.val;
        let borrow = sbb_assign(&mut diff.val[..width], &p.val[..plen]);
        cnd_assign_words(
            &mut rem.val[..width],
            &diff.val[..width],
            Choice::from((borrow ^ 1) as u8),
        );
    }

    rem.set_wlen(plen)?;

    out.copy_from(&rem)
}

/// Modular addition `out = (b + c) mod p` for `b, c < p`.
///
/// The output spans `p.wlen` words.
pub fn mod_add(out: &mut Nn, b: &Nn, c: &Nn, p: &Nn) -> Result<()> {
    b.check_initialized()?;
    c.check_initialized()?;
    p.check_initialized()?;
    should_have!(b.compare(p)?.is_lt(), Error::Precondition);
    should_have!(c.compare(p)?.is_lt(), Error::Precondition);

    let plen = p.wlen;

    let mut sum = Nn::with_wlen(plen)?;
    sum.val[..plen].copy_from_slice(&b.val[..plen]);
    let carry = adc_assign(&mut sum.val[..plen], &c.val[..plen]);

    let mut diff = sum.clone();
    let borrow = sbb_assign(&mut diff.val[..plen], &p.val[..plen]);

    // The sum is at least p when it carried out, or when p fits under it.
    let take_diff = Choice::from((carry | (borrow ^ 1)) as u8);
    cnd_assign_words(&mut sum.val[..plen], &diff.val[..plen], take_diff);

    out.copy_from(&sum)
}

/// Modular subtraction `out = (b - c) mod p` for `b, c < p`.
///
/// The output spans `p.wlen` words.
pub fn mod_sub(out: &mut Nn, b: &Nn, c: &Nn, p: &Nn) -> Result<()> {
    b.check_initialized()?;
    c.check_initialized()?;
    p.check_initialized()?;
    should_have!(b.compare(p)?.is_lt(), Error::Precondition);
    should_have!(c.compare(p)?.is_lt(), Error::Precondition);

    let plen = p.wlen;

    let mut diff = Nn::with_wlen(plen)?;
    diff.val[..plen].copy_from_slice(&b.val[..plen]);
    let borrow = sbb_assign(&mut diff.val[..plen], &c.val[..plen]);
    cnd_adc_assign(&mut diff.val[..plen], &p.val[..plen], Choice::from(borrow as u8));

    out.copy_from(&diff)
}

/// Inverse of `x` modulo `2^WORD_BITS`, with a flag telling whether `x` is
/// odd.
///
/// Newton iteration: an odd `x` is its own inverse modulo 8, and each step
/// `y = y * (2 - x * y)` doubles the number of correct low bits. For an
/// even `x` no inverse exists; the returned word is then meaningless and
/// the flag is unset.
pub fn modinv_2exp_word(x: Word) -> (Word, Choice) {
    let is_odd = Choice::from((x & 1) as u8);
    let mut inv = x;
    let mut bits = 3;

    while bits < WORD_BITS {
        inv = inv.wrapping_mul((2 as Word).wrapping_sub(x.wrapping_mul(inv)));
        bits *= 2;
    }

    (inv, is_odd)
}

impl Nn {
    /// `self -= other` when `cond` holds, in constant time.
    pub fn cnd_sub_assign(&mut self, cond: bool, other: &Nn) -> Result<()> {
        let src = self.clone();

        cnd_sub(cond, self, &src, other)
    }

    /// `self = self mod p`.
    pub fn reduce_assign(&mut self, p: &Nn) -> Result<()> {
        let src = self.clone();

        reduce(self, &src, p)
    }
}

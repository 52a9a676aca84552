//! Montgomery (REDC) multiplication.
//!
//! For an odd modulus `p` spanning `n` words, let `R = 2^(WORD_BITS * n)`.
//! The Montgomery representation of `x < p` is `x * R mod p`, and the
//! Montgomery product of two values is `a * b * R^-1 mod p`. It replaces the
//! division of an ordinary modular product by word multiplications and a
//! single conditional subtraction, given the precomputed
//! `m' = -p^-1 mod 2^WORD_BITS`.
//!
//! The modulus is always considered on at least two words, both when
//! computing the constants and when multiplying, so that the two agree on
//! `R` for every modulus.

use subtle::Choice;
use tracing::trace;

use crate::checks::{must_have, should_have};
use crate::error::{Error, Result};
use crate::primitives::nn::arith::{cnd_assign_words, modinv_2exp_word, sbb_assign, sqr};
use crate::primitives::nn::word::DWord;
use crate::primitives::nn::{NN_MAX_BIT_LEN, Nn, WORD_BITS, Word};

/// Montgomery constants of one odd modulus `p`.
///
/// This is a plain value, computed on demand and consumed by the caller.
#[derive(Clone, Debug)]
pub struct RedcConstants {
    /// `R mod p`, the Montgomery representation of one.
    pub r: Nn,

    /// `R² mod p`, used to enter the Montgomery domain.
    pub r_square: Nn,

    /// `-p^-1 mod 2^WORD_BITS`.
    pub mpinv: Word,
}

/// Copies `p` with its active length raised to at least two words.
fn padded_modulus(p: &Nn) -> Result<Nn> {
    let mut out = p.clone();

    if out.wlen() < 2 {
        out.set_wlen(2)?;
    }

    Ok(out)
}

/// Computes the Montgomery constants of the odd modulus `p`.
///
/// `p` must be odd. It is padded to at least two words, and `R` is two to
/// the power of the padded bit width. `R²` is obtained by a full square
/// followed by a reduction, which requires twice the padded width to fit
/// in the capacity; otherwise the call fails with
/// [`Error::CapacityExceeded`].
pub fn compute_redc_constants(p: &Nn) -> Result<RedcConstants> {
    p.check_initialized()?;
    must_have!(p.is_odd()?, Error::InvalidArgument);

    let p = padded_modulus(p)?;
    let p_rounded_bitlen = WORD_BITS * p.wlen();
    must_have!(2 * p_rounded_bitlen <= NN_MAX_BIT_LEN, Error::CapacityExceeded);

    // The oddness flag of the inverse is ignored: p was checked odd above,
    // so the inverse always exists.
    let (inv, _) = modinv_2exp_word(p.val[0]);
    let mpinv = inv.wrapping_neg();

    let mut r = Nn::one();
    r.shift_left_assign(p_rounded_bitlen)?;
    r.reduce_assign(&p)?;

    let mut r_square = Nn::zero();
    sqr(&mut r_square, &r)?;
    r_square.reduce_assign(&p)?;

    trace!(wlen = p.wlen(), "computed montgomery constants");

    Ok(RedcConstants { r, r_square, mpinv })
}

/// Montgomery product `out = a * b * R^-1 mod p` (CIOS).
///
/// Coarsely Integrated Operand Scanning: for each word `a[i]`, the row
/// `a[i] * b` is accumulated into a buffer one word wider than `p`, then a
/// multiple `m * p` chosen to clear the lowest word is added and the buffer
/// is shifted down by one word. After the last row the buffer is below
/// `2p`, and `p` is subtracted once, in constant time, when needed.
///
/// Both inputs must be below `p`. This is a caller contract only checked
/// in debug builds or with the `strict-checks` feature. `mpinv` must come
/// from [`compute_redc_constants`] for the same modulus.
///
/// The output spans the (padded) width of `p` whatever the widths of the
/// inputs. It is only written once the whole product succeeded.
pub fn montgomery_multiply(out: &mut Nn, a: &Nn, b: &Nn, p: &Nn, mpinv: Word) -> Result<()> {
    a.check_initialized()?;
    b.check_initialized()?;
    p.check_initialized()?;
    should_have!(a.compare(p)?.is_lt(), Error::Precondition);
    should_have!(b.compare(p)?.is_lt(), Error::Precondition);

    let len = p.wlen().max(2);
    must_have!(WORD_BITS * (len + 1) <= NN_MAX_BIT_LEN, Error::CapacityExceeded);

    let mut t = Nn::with_wlen(len + 1)?;

    for i in 0..len {
        let ai = a.val[i];

        let mut carry: Word = 0;
        for j in 0..len {
            let (hi, lo) = mul_add(ai, b.val[j], t.val[j], carry);
            t.val[j] = lo;
            carry = hi;
        }
        let (acc, top) = t.val[len].overflowing_add(carry);
        t.val[len] = acc;

        let m = t.val[0].wrapping_mul(mpinv);

        let (hi, _) = mul_add(m, p.val[0], t.val[0], 0);
        let mut carry = hi;
        for j in 1..len {
            let (hi, lo) = mul_add(m, p.val[j], t.val[j], carry);
            t.val[j - 1] = lo;
            carry = hi;
        }
        let (acc, high) = t.val[len].overflowing_add(carry);
        t.val[len - 1] = acc;
        t.val[len] = top as Word + high as Word;
    }

    let mut diff = t.clone();
    let borrow = sbb_assign(&mut diff.val[..=len], &p.val[..len]);
    cnd_assign_words(
        &mut t.val[..=len],
        &diff.val[..=len],
        Choice::from((borrow ^ 1) as u8),
    );
    must_have!(t.val[len] == 0 && t.compare(p)?.is_lt(), Error::Precondition);

    t.set_wlen(len)?;

    out.copy_from(&t)
}

/// `a * b + c + d` as `(high, low)`; never overflows a double word.
#[inline(always)]
fn mul_add(a: Word, b: Word, c: Word, d: Word) -> (Word, Word) {
    let t = a as DWord * b as DWord + c as DWord + d as DWord;

    ((t >> WORD_BITS) as Word, t as Word)
}

/// Moves `x < p` into the Montgomery domain: `out = x * R mod p`.
pub fn redcify(out: &mut Nn, x: &Nn, p: &Nn, constants: &RedcConstants) -> Result<()> {
    montgomery_multiply(out, x, &constants.r_square, p, constants.mpinv)
}

/// Moves `x` out of the Montgomery domain: `out = x * R^-1 mod p`.
pub fn unredcify(out: &mut Nn, x: &Nn, p: &Nn, constants: &RedcConstants) -> Result<()> {
    montgomery_multiply(out, x, &Nn::one(), p, constants.mpinv)
}

/// Modular product `out = a * b mod p` for an odd `p` and `a, b < p`.
///
/// Computes the Montgomery constants, moves both operands into the
/// Montgomery domain, multiplies them there and moves the product back.
/// Every intermediate is a scratch value wiped when it goes out of scope,
/// on success and on every error path. The first failing step aborts the
/// operation and `out` is left untouched.
pub fn modular_multiply(out: &mut Nn, a: &Nn, b: &Nn, p: &Nn) -> Result<()> {
    a.check_initialized()?;
    b.check_initialized()?;

    let p = padded_modulus(p)?;
    let constants = compute_redc_constants(&p)?;

    let mut a_mont = Nn::new();
    let mut b_mont = Nn::new();
    redcify(&mut a_mont, a, &p, &constants)?;
    redcify(&mut b_mont, b, &p, &constants)?;

    let mut prod = Nn::new();
    montgomery_multiply(&mut prod, &a_mont, &b_mont, &p, constants.mpinv)?;

    unredcify(out, &prod, &p, &constants)
}

impl Nn {
    /// `self = self * b * R^-1 mod p`.
    pub fn montgomery_multiply_assign(&mut self, b: &Nn, p: &Nn, mpinv: Word) -> Result<()> {
        let src = self.clone();

        montgomery_multiply(self, &src, b, p, mpinv)
    }

    /// `self = self * b mod p`.
    pub fn modular_multiply_assign(&mut self, b: &Nn, p: &Nn) -> Result<()> {
        let src = self.clone();

        modular_multiply(self, &src, b, p)
    }
}

//! Machine words and compile-time capacity.
//!
//! A big number is a fixed array of machine words. The word width is a
//! build-time choice: 64-bit words by default, 32-bit words with the
//! `word32` feature. Each width comes with a double-width type used to
//! hold full word products.
//!
//! The capacity of every big number is `NN_MAX_BIT_LEN` bits. It must
//! hold twice the largest supported modulus once rounded up to whole
//! words (a 521-bit modulus rounds to 576 bits with 64-bit words), since
//! the Montgomery constant `R² mod p` is computed through a full square.

#[cfg(not(feature = "word32"))]
mod width {
    pub type Word = u64;
    pub type DWord = u128;
}

#[cfg(feature = "word32")]
mod width {
    pub type Word = u32;
    pub type DWord = u64;
}

/// Machine word composing big-number storage.
pub use width::Word;

pub(crate) use width::DWord;

/// Number of bits in a [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

/// Number of bytes in a [`Word`].
pub const WORD_BYTES: usize = WORD_BITS / 8;

/// Maximum bit length of any big number.
pub const NN_MAX_BIT_LEN: usize = 1152;

/// Maximum number of words of any big number.
pub const NN_MAX_WORD_LEN: usize = NN_MAX_BIT_LEN / WORD_BITS;

/// Maximum number of bytes of any big number.
pub const NN_MAX_BYTE_LEN: usize = NN_MAX_BIT_LEN / 8;

/// Number of words needed to hold `bits` bits.
pub const fn bit_len_words(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Number of words needed to hold `bytes` bytes.
pub const fn byte_len_words(bytes: usize) -> usize {
    bytes.div_ceil(WORD_BYTES)
}

/// Left shift that yields zero for counts of a full word or more.
#[inline(always)]
pub(crate) fn wlshift(w: Word, count: usize) -> Word {
    if count >= WORD_BITS { 0 } else { w << count }
}

/// Right shift that yields zero for counts of a full word or more.
#[inline(always)]
pub(crate) fn wrshift(w: Word, count: usize) -> Word {
    if count >= WORD_BITS { 0 } else { w >> count }
}

/// Counts the leading zero bits of a single word.
///
/// Binary search over halves of the word: at each step the top `s` bits
/// are tested, and when they are all zero the count grows by `s` and the
/// word is shifted up. Every step runs whatever the value, so the
/// sequence of operations does not depend on `w`.
///
/// Returns `WORD_BITS` for zero.
pub fn leading_zero_count(w: Word) -> u32 {
    let mut x = w;
    let mut count = 0u32;
    let mut s = WORD_BITS / 2;

    while s > 0 {
        let top_clear = ((x >> (WORD_BITS - s)) == 0) as u32;
        count += top_clear * s as u32;
        x <<= top_clear as usize * s;
        s /= 2;
    }

    count + (x == 0) as u32
}

mod common;

use common::to_big;
use ecnn::primitives::nn::logical::{
    and, bit_length, get_bit, not, or, rotate_left, rotate_right, shift_left,
    shift_left_fixedlen, shift_right, shift_right_fixedlen, xor,
};
use ecnn::primitives::nn::{NN_MAX_BIT_LEN, NN_MAX_WORD_LEN, WORD_BITS, Word, bit_len_words};
use ecnn::{Error, Nn};

use num_bigint::BigUint;
use proptest::prelude::*;

fn nn_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..64)
}

#[test]
fn shift_left_small_value() {
    let a = Nn::from(0b1011u8);
    let mut out = Nn::new();

    shift_left(&mut out, &a, 2).unwrap();
    assert_eq!(u64::try_from(&out).unwrap(), 44);
    assert_eq!(out.wlen(), 1);

    shift_left(&mut out, &a, WORD_BITS).unwrap();
    assert_eq!(out.wlen(), 2);
    assert_eq!(bit_length(&out).unwrap(), WORD_BITS + 4);
}

#[test]
fn shift_left_caps_at_capacity() {
    let a = Nn::from(0b11u8);
    let mut out = Nn::new();

    shift_left(&mut out, &a, NN_MAX_BIT_LEN - 1).unwrap();
    assert_eq!(out.wlen(), NN_MAX_WORD_LEN);
    assert_eq!(get_bit(&out, NN_MAX_BIT_LEN - 1).unwrap(), 1);
    assert_eq!(bit_length(&out).unwrap(), NN_MAX_BIT_LEN);

    shift_left(&mut out, &a, NN_MAX_BIT_LEN + 10).unwrap();
    assert!(out.is_zero().unwrap());
}

#[test]
fn shift_right_drops_everything() {
    let a = Nn::from(0xFFFFu16);
    let mut out = Nn::new();

    shift_right(&mut out, &a, 16).unwrap();
    assert!(out.is_zero().unwrap());
    assert_eq!(out.wlen(), 0);

    shift_right(&mut out, &a, 4).unwrap();
    assert_eq!(u64::try_from(&out).unwrap(), 0xFFF);
}

#[test]
fn fixedlen_shifts_keep_window() {
    let a = Nn::from(Word::MAX);
    let mut out = Nn::with_wlen(1).unwrap();

    shift_left_fixedlen(&mut out, &a, 4).unwrap();
    assert_eq!(out.wlen(), 1);
    assert_eq!(u64::try_from(&out).unwrap(), (Word::MAX << 4) as u64);

    let mut out = Nn::with_wlen(3).unwrap();
    shift_right_fixedlen(&mut out, &a, 4).unwrap();
    assert_eq!(out.wlen(), 3);
    assert_eq!(u64::try_from(&out).unwrap(), (Word::MAX >> 4) as u64);

    // The output window must be set up by the caller.
    let mut fresh = Nn::new();
    assert_eq!(
        shift_left_fixedlen(&mut fresh, &a, 1),
        Err(Error::InvalidState)
    );
}

#[test]
fn in_place_shifts() {
    let mut x = Nn::from(0xABCDu16);
    x.shift_left_assign(WORD_BITS + 3).unwrap();
    assert_eq!(to_big(&x), BigUint::from(0xABCDu32) << (WORD_BITS + 3));

    x.shift_right_assign(WORD_BITS + 3).unwrap();
    assert_eq!(x, Nn::from(0xABCDu16));

    let mut y = Nn::from(0xF0u8);
    y.set_wlen(1).unwrap();
    y.shift_left_fixedlen_assign(WORD_BITS - 4).unwrap();
    assert_eq!(bit_length(&y).unwrap(), 0);

    let mut z = Nn::from(0xF0u8);
    z.shift_right_fixedlen_assign(4).unwrap();
    assert_eq!(z, Nn::from(0x0Fu8));
}

#[test]
fn rotations() {
    let a = Nn::from(0b1000_0001u8);
    let mut out = Nn::new();

    rotate_left(&mut out, &a, 1, 8).unwrap();
    assert_eq!(u64::try_from(&out).unwrap(), 0b0000_0011);

    rotate_right(&mut out, &a, 1, 8).unwrap();
    assert_eq!(u64::try_from(&out).unwrap(), 0b1100_0000);

    // Bits above the rotation width are ignored.
    let b = Nn::from(0x1F0u16);
    rotate_left(&mut out, &b, 4, 8).unwrap();
    assert_eq!(u64::try_from(&out).unwrap(), 0x0F);
    assert_eq!(out.wlen(), 1);

    let mut c = Nn::from(1u8);
    c.rotate_right_assign(1, 2 * WORD_BITS).unwrap();
    assert_eq!(c.wlen(), 2);
    assert_eq!(get_bit(&c, 2 * WORD_BITS - 1).unwrap(), 1);
    c.rotate_left_assign(1, 2 * WORD_BITS).unwrap();
    assert_eq!(c, Nn::one());
}

#[test]
fn rotation_arguments_checked() {
    let a = Nn::from(1u8);
    let mut out = Nn::new();

    assert_eq!(rotate_left(&mut out, &a, 8, 8), Err(Error::InvalidArgument));
    assert_eq!(
        rotate_right(&mut out, &a, 0, NN_MAX_BIT_LEN + 1),
        Err(Error::InvalidArgument)
    );
    assert_eq!(
        rotate_left(&mut out, &Nn::new(), 1, 8),
        Err(Error::InvalidState)
    );
}

#[test]
fn bitwise_lengths() {
    let a = Nn::from(0xFF00u16);
    let mut b = Nn::from(0x0FF0u16);
    b.set_wlen(3).unwrap();
    let mut out = Nn::new();

    and(&mut out, &a, &b).unwrap();
    assert_eq!(out.wlen(), 3);
    assert_eq!(out, Nn::from(0x0F00u16));

    or(&mut out, &a, &b).unwrap();
    assert_eq!(out, Nn::from(0xFFF0u16));

    xor(&mut out, &a, &b).unwrap();
    assert_eq!(out, Nn::from(0xF0F0u16));

    not(&mut out, &a).unwrap();
    assert_eq!(out.wlen(), a.wlen());
    assert_eq!(u64::try_from(&out).unwrap(), !(0xFF00 as Word) as u64);

    assert_eq!(xor(&mut out, &a, &Nn::new()), Err(Error::InvalidState));
    assert_eq!(not(&mut out, &Nn::new()), Err(Error::InvalidState));
}

#[test]
fn bit_queries() {
    assert_eq!(bit_length(&Nn::zero()).unwrap(), 0);
    assert_eq!(bit_length(&Nn::with_wlen(4).unwrap()).unwrap(), 0);
    assert_eq!(bit_length(&Nn::from(1u8)).unwrap(), 1);
    assert_eq!(bit_length(&Nn::from(u128::MAX)).unwrap(), 128);

    let x = Nn::from(0b101u8);
    assert_eq!(get_bit(&x, 0).unwrap(), 1);
    assert_eq!(get_bit(&x, 1).unwrap(), 0);
    assert_eq!(get_bit(&x, 2).unwrap(), 1);
    assert_eq!(get_bit(&x, NN_MAX_BIT_LEN - 1).unwrap(), 0);
    assert_eq!(get_bit(&x, NN_MAX_BIT_LEN), Err(Error::InvalidArgument));
}

proptest! {
    #[test]
    fn shift_roundtrip(bytes in nn_bytes(), count in 0usize..NN_MAX_BIT_LEN) {
        let x = Nn::from_be_bytes(&bytes).unwrap();
        prop_assume!(count + bit_length(&x).unwrap() <= NN_MAX_BIT_LEN);

        let mut shifted = Nn::new();
        shift_left(&mut shifted, &x, count).unwrap();
        prop_assert_eq!(to_big(&shifted), to_big(&x) << count);

        let mut back = Nn::new();
        shift_right(&mut back, &shifted, count).unwrap();
        prop_assert_eq!(&back, &x);

        shifted.shift_right_assign(count).unwrap();
        prop_assert_eq!(&shifted, &x);
    }

    #[test]
    fn shift_right_matches_reference(bytes in nn_bytes(), count in 0usize..600) {
        let x = Nn::from_be_bytes(&bytes).unwrap();

        let mut out = Nn::new();
        shift_right(&mut out, &x, count).unwrap();
        prop_assert_eq!(to_big(&out), to_big(&x) >> count);
    }

    #[test]
    fn rotate_roundtrip(bytes in nn_bytes(), bitlen in 1usize..=NN_MAX_BIT_LEN, seed in any::<usize>()) {
        let count = seed % bitlen;
        let x = Nn::from_be_bytes(&bytes).unwrap();

        let mut left = Nn::new();
        rotate_left(&mut left, &x, count, bitlen).unwrap();
        prop_assert_eq!(left.wlen(), bit_len_words(bitlen));

        let mut back = Nn::new();
        rotate_right(&mut back, &left, count, bitlen).unwrap();

        let mask = (BigUint::from(1u8) << bitlen) - 1u8;
        prop_assert_eq!(to_big(&back), to_big(&x) & mask);
    }

    #[test]
    fn bitwise_identities(bytes in nn_bytes()) {
        let x = Nn::from_be_bytes(&bytes).unwrap();
        let mut nx = Nn::new();
        not(&mut nx, &x).unwrap();

        let mut out = Nn::new();
        xor(&mut out, &x, &x).unwrap();
        prop_assert!(out.is_zero().unwrap());

        and(&mut out, &x, &nx).unwrap();
        prop_assert!(out.is_zero().unwrap());

        or(&mut out, &x, &nx).unwrap();
        let all = (BigUint::from(1u8) << (x.wlen() * WORD_BITS)) - 1u8;
        prop_assert_eq!(to_big(&out), all);

        let mut y = x.clone();
        y.xor_assign(&x).unwrap();
        prop_assert!(y.is_zero().unwrap());
    }
}

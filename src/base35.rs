//! 128-bit integer ↔ base-35 digit conversion.
//!
//! Digits here are *values* (0..35), not symbols; the alphabet mapping lives
//! in [`crate::alphabet`].  Encoding always produces exactly [`DATA_LEN`]
//! digits.  Decoding accepts any number of digits and reports overflow past
//! `u128::MAX` instead of wrapping.

use crate::alphabet::BASE;

/// Number of data digits in an encoded value: ceil(log35(2^128)).
pub const DATA_LEN: usize = 25;

// 35^25 > 2^128, checked at compile time: the 25th power must overflow u128
// while the 24th still fits below it.
const _: () = assert!((BASE as u128).checked_pow(DATA_LEN as u32).is_none());
const _: () = assert!(match (BASE as u128).checked_pow(DATA_LEN as u32 - 1) {
    Some(p) => p < u128::MAX,
    None    => false,
});

/// Split `value` into exactly [`DATA_LEN`] digits, most significant first,
/// left-padded with zero digits.
pub fn to_digits(mut value: u128) -> [u8; DATA_LEN] {
    let base = BASE as u128;
    let mut digits = [0u8; DATA_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = (value % base) as u8;
        value /= base;
    }
    // Guaranteed by 35^25 > 2^128; a non-zero remainder is a broken build.
    debug_assert_eq!(value, 0, "u128 does not fit in {DATA_LEN} base-35 digits");
    digits
}

/// Fold digits (most significant first) into an integer.
///
/// Returns `None` if the value exceeds `u128::MAX`.  Leading zero digits are
/// harmless, so sequences longer than [`DATA_LEN`] only fail when the value
/// itself is too large.
pub fn from_digits(digits: &[u8]) -> Option<u128> {
    let base = BASE as u128;
    digits.iter().try_fold(0u128, |acc, &d| {
        acc.checked_mul(base)?.checked_add(d as u128)
    })
}

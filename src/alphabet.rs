//! The frozen base-35 alphabet and its lookup tables.
//!
//! Index `i` of [`ALPHABET`] is the symbol for digit value `i`.  The letter
//! `o` is excluded so it can never be confused with the digit `0`.  Both
//! directions are `const` tables; the checks below run at compile time, so a
//! build with a corrupted alphabet does not exist.

/// The 35 symbols, in digit-value order.
pub const ALPHABET: &[u8; 35] = b"0123456789abcdefghijklmnpqrstuvwxyz";

/// Numeric base of the encoding.
pub const BASE: u32 = ALPHABET.len() as u32;

/// Marker for "not an alphabet symbol" in [`DECODE_TABLE`].
const INVALID: u8 = 0xFF;

/// Byte → digit value.  Only lowercase entries are populated; callers fold
/// case before lookup.
pub const DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const fn alphabet_is_well_formed() -> bool {
    let mut i = 0;
    while i < ALPHABET.len() {
        if ALPHABET[i] == b'o' || ALPHABET[i] == b'O' {
            return false;
        }
        // Every symbol must map back to its own index: rules out duplicates.
        if DECODE_TABLE[ALPHABET[i] as usize] as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(ALPHABET.len() == 35);
const _: () = assert!(alphabet_is_well_formed());

/// Digit value of `symbol`, or `None` when it is not in the alphabet.
#[inline]
pub fn index_of(symbol: char) -> Option<u8> {
    if !symbol.is_ascii() {
        return None;
    }
    match DECODE_TABLE[symbol as usize] {
        INVALID => None,
        v       => Some(v),
    }
}

/// Symbol for digit value `digit`.
///
/// # Panics
/// If `digit >= 35`.  Digit values are always produced modulo [`BASE`].
#[inline]
pub fn symbol_at(digit: u8) -> char {
    ALPHABET[digit as usize] as char
}

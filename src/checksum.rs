//! The single-symbol v6sf checksum.
//!
//! checksum = (Σ digit values of the data symbols) mod 35
//!
//! This is a transcription aid, not an error-detecting code: any substitution
//! that preserves the sum modulo 35 and every transposition of two symbols
//! goes unnoticed.  The algorithm is part of the wire format and must not be
//! strengthened.

use crate::alphabet::{index_of, symbol_at, BASE};
use crate::codec::CodecError;

/// Checksum digit over already-validated digit values.
#[inline]
pub fn checksum_digit(digits: &[u8]) -> u8 {
    digits
        .iter()
        .fold(0u32, |acc, &d| (acc + d as u32) % BASE) as u8
}

/// Compute the checksum symbol of `data` (data symbols only, no prefix, no
/// separators).  Input is lowercased first.
///
/// Fails with [`CodecError::InvalidCharacter`] on the first symbol outside
/// the alphabet.
pub fn compute_checksum(data: &str) -> Result<char, CodecError> {
    let digits = data
        .chars()
        .enumerate()
        .map(|(position, c)| {
            let symbol = c.to_ascii_lowercase();
            index_of(symbol).ok_or(CodecError::InvalidCharacter { symbol, position })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(symbol_at(checksum_digit(&digits)))
}

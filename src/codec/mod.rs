//! The v6sf codec: IPv6 address ↔ `v6sf:` string.
//!
//! # Wire format
//! ```text
//! v6sf:<25 data symbols><1 checksum symbol>
//! v6sf:dddd:dddd:dddd:dddd:dddd:dddd:dc     (grouped)
//! ```
//! Data symbols are the address as a 25-digit base-35 number, most
//! significant digit first, zero-padded.  The checksum is defined in
//! [`crate::checksum`].  The prefix is emitted lowercase and accepted in any
//! case.  Colons in the body are cosmetic: the decoder drops all of them
//! before looking at anything else, so any grouping is accepted.
//!
//! # Validation order
//! prefix → length → alphabet → checksum → range.  The first failing stage
//! decides the error; nothing is ever corrected.

use std::net::Ipv6Addr;

use thiserror::Error;
use tracing::{debug, trace};

use crate::address::{canonical, parse_address, AddressError};
use crate::alphabet::{index_of, symbol_at};
use crate::base35::{from_digits, to_digits, DATA_LEN};
use crate::block::{block_join, block_split};
use crate::checksum::checksum_digit;

/// Literal prefix of every encoded value.
pub const PREFIX: &str = "v6sf:";

/// Symbols in a well-formed body: data plus checksum.
pub const BODY_LEN: usize = DATA_LEN + 1;

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed IPv6 address: {0}")]
    MalformedAddress(#[from] AddressError),
    #[error("missing '{PREFIX}' prefix")]
    MissingPrefix,
    #[error("encoded value too short: {found} symbol(s), need at least 2")]
    TooShort { found: usize },
    /// `position` counts symbols after the prefix with separators removed.
    #[error("invalid character {symbol:?} at position {position}")]
    InvalidCharacter { symbol: char, position: usize },
    #[error("checksum mismatch: expected '{expected}', found '{found}'")]
    ChecksumMismatch { expected: char, found: char },
    #[error("encoded value exceeds 128 bits")]
    ValueOutOfRange,
}

// ── Options ──────────────────────────────────────────────────────────────────

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Insert a `:` after every 4 symbols of the body.
    pub separators: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { separators: true }
    }
}

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Encode a 128-bit value.  Infallible: every `u128` has an encoding.
pub fn encode_value(value: u128, with_separators: bool) -> String {
    let digits = to_digits(value);
    let check = checksum_digit(&digits);

    let body: String = digits
        .iter()
        .chain(std::iter::once(&check))
        .map(|&d| symbol_at(d))
        .collect();
    trace!(value = %format_args!("{value:#034x}"), %body, "encoded digits");

    let body = if with_separators { block_split(&body) } else { body };
    format!("{PREFIX}{body}")
}

/// Encode IPv6 text (any standard form, `::` allowed).
pub fn encode(address: &str, with_separators: bool) -> Result<String, CodecError> {
    let value = parse_address(address).map_err(|e| {
        debug!(input = address, error = %e, "rejected IPv6 address");
        CodecError::from(e)
    })?;
    let encoded = encode_value(value, with_separators);
    debug!(input = address, %encoded, "encoded address");
    Ok(encoded)
}

/// [`encode`] driven by an [`EncodeOptions`].
pub fn encode_with(address: &str, opts: &EncodeOptions) -> Result<String, CodecError> {
    encode(address, opts.separators)
}

/// Encode a parsed address.
pub fn encode_addr(addr: Ipv6Addr, with_separators: bool) -> String {
    encode_value(u128::from(addr), with_separators)
}

// ── Decoding ─────────────────────────────────────────────────────────────────

/// Decode a v6sf string to its 128-bit value.
pub fn decode_value(encoded: &str) -> Result<u128, CodecError> {
    let result = decode_inner(encoded);
    if let Err(e) = &result {
        debug!(input = encoded, error = %e, "rejected v6sf value");
    }
    result
}

fn decode_inner(encoded: &str) -> Result<u128, CodecError> {
    let lower = encoded.to_ascii_lowercase();
    let body = lower.strip_prefix(PREFIX).ok_or(CodecError::MissingPrefix)?;

    let symbols: Vec<char> = block_join(body).chars().collect();
    if symbols.len() < 2 {
        return Err(CodecError::TooShort { found: symbols.len() });
    }

    let digits = symbols
        .iter()
        .enumerate()
        .map(|(position, &symbol)| {
            index_of(symbol).ok_or(CodecError::InvalidCharacter { symbol, position })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    // Non-empty: length checked above.
    let (&found, data) = digits.split_last().ok_or(CodecError::TooShort { found: 0 })?;
    let expected = checksum_digit(data);
    if expected != found {
        return Err(CodecError::ChecksumMismatch {
            expected: symbol_at(expected),
            found:    symbol_at(found),
        });
    }

    from_digits(data).ok_or(CodecError::ValueOutOfRange)
}

/// Decode a v6sf string to the canonical, fully expanded IPv6 address.
pub fn decode(encoded: &str) -> Result<String, CodecError> {
    let address = canonical(decode_value(encoded)?);
    debug!(input = encoded, %address, "decoded address");
    Ok(address)
}

/// Decode a v6sf string to an [`Ipv6Addr`].
pub fn decode_addr(encoded: &str) -> Result<Ipv6Addr, CodecError> {
    decode_value(encoded).map(Ipv6Addr::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::normalize;
    use crate::checksum::compute_checksum;
    use proptest::prelude::*;

    const DOC: &str = "2001:0db8:0000:0000:0000:0000:0000:0001";

    #[test]
    fn documentation_address_vector() {
        let plain = encode(DOC, false).unwrap();
        assert_eq!(plain, "v6sf:3qdl9tllemcmf3ycgn5frwmwre");
        assert_eq!(plain.len(), PREFIX.len() + BODY_LEN);
        let (data, check) = plain[PREFIX.len()..].split_at(DATA_LEN);
        assert_eq!(compute_checksum(data).unwrap().to_string(), check);
        assert_eq!(decode(&plain).unwrap(), DOC);
    }

    #[test]
    fn shorthand_input_with_separators() {
        let grouped = encode("2001:db8::1", true).unwrap();
        assert_eq!(grouped, "v6sf:3qdl:9tll:emcm:f3yc:gn5f:rwmw:re");
        let groups: Vec<&str> = grouped[PREFIX.len()..].split(':').collect();
        assert_eq!(groups.len(), 7);
        assert_eq!(groups.last().unwrap().len(), 2);
        assert_eq!(decode(&grouped).unwrap(), DOC);
    }

    #[test]
    fn extreme_values() {
        assert_eq!(encode_value(1, false), "v6sf:00000000000000000000000011");
        assert_eq!(encode_value(u128::MAX, true), "v6sf:usz5:xbbi:qsfq:7s72:7m0p:zr2x:a4");
        assert_eq!(decode_value("v6sf:usz5:xbbi:qsfq:7s72:7m0p:zr2x:a4").unwrap(), u128::MAX);
    }

    #[test]
    fn all_zero_vector() {
        let zeros = "0".repeat(DATA_LEN);
        let check = compute_checksum(&zeros).unwrap();
        let encoded = format!("v6sf:{zeros}{check}");
        assert_eq!(decode(&encoded).unwrap(), "0000:0000:0000:0000:0000:0000:0000:0000");
        assert_eq!(encode("::", false).unwrap(), encoded);
    }

    #[test]
    fn flipped_symbol_is_checksum_mismatch() {
        let mut body: Vec<char> = "0".repeat(BODY_LEN).chars().collect();
        body[7] = '5';
        let encoded = format!("v6sf:{}", body.iter().collect::<String>());
        assert_eq!(
            decode(&encoded),
            Err(CodecError::ChecksumMismatch { expected: '5', found: '0' })
        );
    }

    #[test]
    fn corrupted_prefix() {
        assert_eq!(decode("6sf:3qdl9tllemcmf3ycgn5frwmwre"), Err(CodecError::MissingPrefix));
        assert_eq!(decode("3qdl9tllemcmf3ycgn5frwmwre"), Err(CodecError::MissingPrefix));
        assert_eq!(decode(""), Err(CodecError::MissingPrefix));
    }

    #[test]
    fn prefix_and_body_are_case_insensitive() {
        assert_eq!(decode("V6SF:3QDL:9TLL:EMCM:F3YC:GN5F:RWMW:RE").unwrap(), DOC);
    }

    #[test]
    fn letter_o_is_invalid() {
        let encoded = "v6sf:3qdl9tllemcmf3ycgn5fowmwre";
        assert_eq!(
            decode(encoded),
            Err(CodecError::InvalidCharacter { symbol: 'o', position: 20 })
        );
        assert!(matches!(
            decode(&encoded.to_uppercase()),
            Err(CodecError::InvalidCharacter { symbol: 'o', .. })
        ));
    }

    #[test]
    fn invalid_checksum_symbol_is_invalid_character() {
        let encoded = format!("v6sf:{}!", "0".repeat(DATA_LEN));
        assert!(matches!(
            decode(&encoded),
            Err(CodecError::InvalidCharacter { symbol: '!', position: 25 })
        ));
    }

    #[test]
    fn too_short_bodies() {
        assert_eq!(decode("v6sf:"), Err(CodecError::TooShort { found: 0 }));
        assert_eq!(decode("v6sf:1"), Err(CodecError::TooShort { found: 1 }));
        assert_eq!(decode("v6sf::::1:"), Err(CodecError::TooShort { found: 1 }));
    }

    #[test]
    fn short_but_valid_bodies_decode() {
        // One data symbol plus its checksum.
        assert_eq!(decode_value("v6sf:11").unwrap(), 1);
        assert_eq!(decode_value("v6sf:z:z").unwrap(), 34);
    }

    #[test]
    fn oversized_value_is_out_of_range() {
        let data = "z".repeat(DATA_LEN);
        let check = compute_checksum(&data).unwrap();
        assert_eq!(decode(&format!("v6sf:{data}{check}")), Err(CodecError::ValueOutOfRange));
    }

    #[test]
    fn long_body_with_leading_zeros_is_in_range() {
        let encoded = format!("v6sf:{}11", "0".repeat(40));
        assert_eq!(decode_value(&encoded).unwrap(), 1);
    }

    #[test]
    fn malformed_address_is_reported() {
        assert!(matches!(encode("1::2::3", true), Err(CodecError::MalformedAddress(_))));
        assert!(matches!(encode("not an address", false), Err(CodecError::MalformedAddress(_))));
    }

    #[test]
    fn ipv6addr_interop() {
        let addr: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let encoded = encode_addr(addr, true);
        assert_eq!(encoded, encode(DOC, true).unwrap());
        assert_eq!(decode_addr(&encoded).unwrap(), addr);
    }

    #[test]
    fn options_default_to_grouped() {
        let opts = EncodeOptions::default();
        assert_eq!(encode_with("::1", &opts).unwrap(), encode("::1", true).unwrap());
        let flat = EncodeOptions { separators: false };
        assert!(!encode_with("::1", &flat).unwrap()[PREFIX.len()..].contains(':'));
    }

    proptest! {
        #[test]
        fn roundtrip_any_value(value in any::<u128>()) {
            let grouped = encode_value(value, true);
            let flat = encode_value(value, false);
            prop_assert_eq!(flat.len(), PREFIX.len() + BODY_LEN);
            prop_assert_eq!(decode_value(&grouped).unwrap(), value);
            prop_assert_eq!(decode_value(&flat).unwrap(), value);
            prop_assert_eq!(decode(&grouped).unwrap(), canonical(value));
        }

        #[test]
        fn decode_inverts_encode_on_text(value in any::<u128>()) {
            let text = Ipv6Addr::from(value).to_string();
            let expected = normalize(&text).unwrap();
            prop_assert_eq!(decode(&encode(&text, true).unwrap()).unwrap(), expected.clone());
            prop_assert_eq!(decode(&encode(&text, false).unwrap()).unwrap(), expected);
        }

        #[test]
        fn colons_anywhere_are_ignored(
            value in any::<u128>(),
            cuts in proptest::collection::vec(0usize..=BODY_LEN, 0..12),
        ) {
            let flat = encode_value(value, false);
            let mut body: Vec<char> = flat[PREFIX.len()..].chars().collect();
            let mut cuts = cuts;
            cuts.sort_unstable_by(|a, b| b.cmp(a));
            for cut in cuts {
                body.insert(cut, ':');
            }
            let mangled = format!("{PREFIX}{}", body.iter().collect::<String>());
            prop_assert_eq!(decode_value(&mangled).unwrap(), value);
        }

        #[test]
        fn single_substitution_changing_the_sum_is_caught(
            value in any::<u128>(),
            position in 0usize..DATA_LEN,
            delta in 1u8..35,
        ) {
            let flat = encode_value(value, false);
            let mut body: Vec<char> = flat[PREFIX.len()..].chars().collect();
            let old = index_of(body[position]).unwrap();
            body[position] = symbol_at((old + delta) % 35);
            let mangled = format!("{PREFIX}{}", body.iter().collect::<String>());
            // A single substitution always shifts the sum by delta (mod 35).
            let caught = matches!(decode_value(&mangled), Err(CodecError::ChecksumMismatch { .. }));
            prop_assert!(caught);
        }
    }
}

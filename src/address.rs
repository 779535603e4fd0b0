//! IPv6 text normalization.
//!
//! Accepts the usual textual forms (fully expanded, `::`-compressed, mixed
//! case, leading zeros dropped) and reduces them to the 128-bit value the
//! codec works on.  Output text is always the canonical expansion: 8 groups
//! of 4 lowercase hex digits, no compression.
//!
//! Embedded IPv4 (`::ffff:192.0.2.1`) and zone suffixes (`fe80::1%eth0`) are
//! not accepted; `.` and `%` are reported as invalid characters.

use thiserror::Error;

/// Number of 16-bit groups in an address.
pub const GROUPS: usize = 8;
/// Maximum hex digits in one group.
pub const GROUP_DIGITS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },
    #[error("'::' may appear at most once")]
    MultipleCompressions,
    #[error("group {group:?} has more than {GROUP_DIGITS} hex digits")]
    GroupTooLong { group: String },
    #[error("group {group:?} is not a hex number")]
    InvalidGroup { group: String },
    #[error("empty group (stray ':')")]
    EmptyGroup,
    #[error("expected {GROUPS} groups after expansion, found {found}")]
    WrongGroupCount { found: usize },
}

/// Parse IPv6 text into its 128-bit value, most significant group first.
pub fn parse_address(text: &str) -> Result<u128, AddressError> {
    if text.is_empty() {
        return Err(AddressError::Empty);
    }
    if let Some((position, ch)) = text
        .chars()
        .enumerate()
        .find(|&(_, c)| !(c.is_ascii_hexdigit() || c == ':'))
    {
        return Err(AddressError::InvalidCharacter { ch, position });
    }

    let halves: Vec<&str> = text.split("::").collect();
    let groups = match halves.as_slice() {
        [whole] => {
            let groups = parse_groups(whole)?;
            if groups.len() != GROUPS {
                return Err(AddressError::WrongGroupCount { found: groups.len() });
            }
            groups
        }
        [head, tail] => {
            let head = parse_groups(head)?;
            let tail = parse_groups(tail)?;
            // `::` stands for at least one zero group.
            let explicit = head.len() + tail.len();
            if explicit >= GROUPS {
                return Err(AddressError::WrongGroupCount { found: explicit + 1 });
            }
            let mut groups = head;
            groups.resize(GROUPS - tail.len(), 0);
            groups.extend(tail);
            groups
        }
        _ => return Err(AddressError::MultipleCompressions),
    };

    Ok(groups
        .iter()
        .fold(0u128, |acc, &g| (acc << 16) | g as u128))
}

fn parse_groups(part: &str) -> Result<Vec<u16>, AddressError> {
    if part.is_empty() {
        return Ok(Vec::new());
    }
    part.split(':')
        .map(|group| {
            if group.is_empty() {
                return Err(AddressError::EmptyGroup);
            }
            if group.len() > GROUP_DIGITS {
                return Err(AddressError::GroupTooLong { group: group.to_string() });
            }
            u16::from_str_radix(group, 16)
                .map_err(|_| AddressError::InvalidGroup { group: group.to_string() })
        })
        .collect()
}

/// Render a 128-bit value as the canonical, fully expanded address.
pub fn canonical(value: u128) -> String {
    (0..GROUPS)
        .rev()
        .map(|i| format!("{:04x}", (value >> (16 * i)) as u16))
        .collect::<Vec<_>>()
        .join(":")
}

/// Normalize IPv6 text to its canonical expansion.
pub fn normalize(text: &str) -> Result<String, AddressError> {
    parse_address(text).map(canonical)
}

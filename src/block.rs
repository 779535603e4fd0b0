/// Symbols per colon-separated block.
pub const BLOCK_SIZE: usize = 4;
pub const BLOCK_SEPARATOR: char = ':';

/// Insert a separator after every [`BLOCK_SIZE`] symbols, never after the
/// last one.  The final block holds 1..=4 symbols.
pub fn block_split(body: &str) -> String {
    let len = body.chars().count();
    let mut out = String::with_capacity(len + len / BLOCK_SIZE);
    for (i, c) in body.chars().enumerate() {
        out.push(c);
        if (i + 1) % BLOCK_SIZE == 0 && i + 1 < len {
            out.push(BLOCK_SEPARATOR);
        }
    }
    out
}

/// Drop every separator, wherever it appears.  Separators carry no meaning.
pub fn block_join(text: &str) -> String {
    text.chars().filter(|&c| c != BLOCK_SEPARATOR).collect()
}

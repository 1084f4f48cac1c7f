//! RFC 1459 case folding for nicknames and channel names.
//!
//! Besides ASCII letters, the characters `[]\~` fold to `{}|^`, so
//! `Nick[away]` and `nick{away}` name the same user.

/// Fold one character.
#[inline]
pub const fn fold_char(c: char) -> char {
    match c {
        'A'..='Z' => (c as u8 + 32) as char,
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a whole name into its registry key.
pub fn fold(name: &str) -> String {
    name.chars().map(fold_char).collect()
}

/// Compare two names under RFC 1459 folding without allocating.
pub fn folded_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .chars()
            .zip(b.chars())
            .all(|(x, y)| fold_char(x) == fold_char(y))
}

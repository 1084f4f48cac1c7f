//! Nickname and channel-name validation.

/// Longest nickname RFC 2812 allows.
pub const DEFAULT_NICK_LEN: usize = 9;

/// Longest channel name RFC 2812 allows.
pub const DEFAULT_CHANNEL_LEN: usize = 50;

/// The one nickname accepted regardless of the configured length limit.
pub const ANONYMOUS_NICK: &str = "anonymous";

/// `[ ] \ ` ^ _ { | }`
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

/// True when `nick` matches the RFC 2812 nickname grammar, ignoring length.
pub fn matches_nick_pattern(nick: &str) -> bool {
    let mut chars = nick.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && !is_special(first) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
}

/// Full nickname check: grammar plus length, with the `anonymous` exception.
pub fn is_valid_nick(nick: &str, max_len: usize) -> bool {
    if !matches_nick_pattern(nick) {
        return false;
    }
    nick.len() <= max_len || nick == ANONYMOUS_NICK
}

/// True when `name` looks like a channel: a `# & + !` prefix followed by
/// anything except space, comma, BEL, NUL, CR/LF or colon.
pub fn matches_channel_pattern(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some('#' | '&' | '+' | '!') => {}
        _ => return false,
    }
    chars.all(|c| !matches!(c, ' ' | ',' | '\x07' | '\0' | '\r' | '\n' | ':'))
}

/// Full channel-name check: grammar plus length.
pub fn is_valid_channel(name: &str, max_len: usize) -> bool {
    name.len() > 1 && name.len() <= max_len && matches_channel_pattern(name)
}

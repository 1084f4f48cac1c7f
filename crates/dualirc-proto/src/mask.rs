//! `nick!user@host` masks and glob matching.
//!
//! Ban and exception lists store masks exactly as they were given. A mask
//! only takes effect when it splits into exactly three components; anything
//! else is kept in the list but never matches.

use crate::casemap::fold_char;

/// A parsed `nick!user@host` mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask<'a> {
    pub nick: &'a str,
    pub user: &'a str,
    pub host: &'a str,
}

impl<'a> Mask<'a> {
    /// Split a raw mask. Returns `None` unless there is exactly one `!`
    /// followed by exactly one `@`.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (nick, rest) = raw.split_once('!')?;
        let (user, host) = rest.split_once('@')?;
        if nick.is_empty() || user.is_empty() || host.is_empty() {
            return None;
        }
        if user.contains('!') || host.contains('!') || host.contains('@') {
            return None;
        }
        Some(Self { nick, user, host })
    }

    /// Whether this mask covers the given identity.
    pub fn matches(&self, nick: &str, user: &str, host: &str) -> bool {
        glob_match(self.nick, nick) && glob_match(self.user, user) && glob_match(self.host, host)
    }
}

/// Test a raw mask string against an identity; unparseable masks never match.
pub fn mask_matches(raw: &str, nick: &str, user: &str, host: &str) -> bool {
    Mask::parse(raw).is_some_and(|m| m.matches(nick, user, host))
}

/// Case-insensitive glob with `*` (any run) and `?` (one character).
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().map(fold_char).collect();
    let t: Vec<char> = text.chars().map(fold_char).collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

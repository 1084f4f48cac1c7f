//! Per-channel state and the broadcast primitive.

use std::collections::HashMap;

use dualirc_proto::mask_matches;
use dualirc_proto::reply::ChannelKind;
use dualirc_proto::Reply;

use super::{Session, Uid};

/// An entry in a mask list (bans, excepts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub mask: String,
    pub set_by: String,
    pub set_at: i64,
}

/// Channel topic with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub set_by: String,
    pub set_at: i64,
}

/// Member modes (op, voice).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemberModes {
    pub op: bool,    // +o
    pub voice: bool, // +v
}

impl MemberModes {
    /// Get the highest prefix character for this member.
    pub fn prefix_char(&self) -> Option<char> {
        if self.op {
            Some('@')
        } else if self.voice {
            Some('+')
        } else {
            None
        }
    }

    /// Operator or voiced.
    pub fn can_speak_moderated(&self) -> bool {
        self.op || self.voice
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub uid: Uid,
    pub modes: MemberModes,
}

/// Boolean channel modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelFlags {
    pub anonymous: bool,   // +a
    pub invite_only: bool, // +i
    pub moderated: bool,   // +m
    pub no_external: bool, // +n
    pub quiet: bool,       // +q
    pub private: bool,     // +p
    pub secret: bool,      // +s
    pub reop: bool,        // +r
    pub topic_lock: bool,  // +t
}

impl ChannelFlags {
    /// Simple flag letters in display order.
    pub const LETTERS: &'static str = "aimnqpsrt";

    fn slot(&mut self, letter: char) -> Option<&mut bool> {
        Some(match letter {
            'a' => &mut self.anonymous,
            'i' => &mut self.invite_only,
            'm' => &mut self.moderated,
            'n' => &mut self.no_external,
            'q' => &mut self.quiet,
            'p' => &mut self.private,
            's' => &mut self.secret,
            'r' => &mut self.reop,
            't' => &mut self.topic_lock,
            _ => return None,
        })
    }

    pub fn get(&self, letter: char) -> Option<bool> {
        let mut copy = *self;
        copy.slot(letter).map(|v| *v)
    }

    /// Set a flag. Returns `Some(true)` when the value changed, `Some(false)`
    /// when it already had that value, `None` for letters that are not
    /// simple flags.
    pub fn set(&mut self, letter: char, on: bool) -> Option<bool> {
        let slot = self.slot(letter)?;
        let changed = *slot != on;
        *slot = on;
        Some(changed)
    }
}

/// One channel.
#[derive(Debug, Clone)]
pub struct Channel {
    /// Display name, as first created.
    pub name: String,
    pub members: Vec<Member>,
    pub bans: Vec<ListEntry>,
    pub excepts: Vec<ListEntry>,
    /// Folded nicknames holding an invite.
    pub invited: Vec<String>,
    pub topic: Option<Topic>,
    pub flags: ChannelFlags,
    pub key: Option<String>,
    pub limit: Option<usize>,
    /// Unix seconds.
    pub created: i64,
}

impl Channel {
    pub fn new(name: impl Into<String>, created: i64) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            bans: Vec::new(),
            excepts: Vec::new(),
            invited: Vec::new(),
            topic: None,
            flags: ChannelFlags::default(),
            key: None,
            limit: None,
            created,
        }
    }

    pub fn member(&self, uid: Uid) -> Option<&Member> {
        self.members.iter().find(|m| m.uid == uid)
    }

    pub fn member_mut(&mut self, uid: Uid) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.uid == uid)
    }

    pub fn is_member(&self, uid: Uid) -> bool {
        self.member(uid).is_some()
    }

    pub fn is_op(&self, uid: Uid) -> bool {
        self.member(uid).is_some_and(|m| m.modes.op)
    }

    pub fn modes_of(&self, uid: Uid) -> MemberModes {
        self.member(uid).map(|m| m.modes).unwrap_or_default()
    }

    /// Append a member; no-op if already present.
    pub fn add_member(&mut self, uid: Uid, modes: MemberModes) {
        if !self.is_member(uid) {
            self.members.push(Member { uid, modes });
        }
    }

    /// Remove a member, returning whether it was present.
    pub fn remove_member(&mut self, uid: Uid) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.uid != uid);
        self.members.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|l| self.members.len() >= l)
    }

    pub fn is_banned(&self, nick: &str, user: &str, host: &str) -> bool {
        self.bans
            .iter()
            .any(|b| mask_matches(&b.mask, nick, user, host))
    }

    pub fn is_excepted(&self, nick: &str, user: &str, host: &str) -> bool {
        self.excepts
            .iter()
            .any(|e| mask_matches(&e.mask, nick, user, host))
    }

    /// Banned and not covered by an exception.
    pub fn denies(&self, session: &Session) -> bool {
        let nick = session.display_nick();
        let user = session.username();
        self.is_banned(nick, user, &session.host) && !self.is_excepted(nick, user, &session.host)
    }

    pub fn is_invited(&self, folded_nick: &str) -> bool {
        self.invited.iter().any(|n| n == folded_nick)
    }

    pub fn add_invite(&mut self, folded_nick: String) {
        if !self.is_invited(&folded_nick) {
            self.invited.push(folded_nick);
        }
    }

    pub fn drop_invite(&mut self, folded_nick: &str) {
        self.invited.retain(|n| n != folded_nick);
    }

    /// Hidden from LIST and from non-members.
    pub fn is_hidden(&self) -> bool {
        self.flags.secret || self.flags.private
    }

    pub fn kind(&self) -> ChannelKind {
        if self.flags.secret {
            ChannelKind::Secret
        } else if self.flags.private {
            ChannelKind::Private
        } else {
            ChannelKind::Public
        }
    }

    /// Current modes as `(flags, params)`: simple flags in display order,
    /// then `l`, then `k`; parameters follow the same order.
    pub fn mode_string(&self) -> (String, Vec<String>) {
        let mut modes = String::from("+");
        let mut params = Vec::new();
        modes.extend(
            ChannelFlags::LETTERS
                .chars()
                .filter(|&c| self.flags.get(c).unwrap_or(false)),
        );
        if let Some(limit) = self.limit {
            modes.push('l');
            params.push(limit.to_string());
        }
        if let Some(key) = &self.key {
            modes.push('k');
            params.push(key.clone());
        }
        (modes, params)
    }

    /// Deliver `reply` to every member except `exclude`.
    ///
    /// Recipient queues are collected before anything is sent.
    pub fn broadcast(
        &self,
        sessions: &HashMap<Uid, Session>,
        reply: &Reply,
        exclude: Option<Uid>,
    ) {
        let recipients: Vec<_> = self
            .members
            .iter()
            .filter(|m| Some(m.uid) != exclude)
            .filter_map(|m| sessions.get(&m.uid))
            .map(|s| s.sender().clone())
            .collect();
        for tx in recipients {
            let _ = tx.send(reply.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TransportKind;
    use dualirc_proto::reply::ErrorEvent;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    fn uid(n: u64) -> Uid {
        Uid::from_raw(n)
    }

    #[test]
    fn fresh_channel_has_empty_modes() {
        let chan = Channel::new("#a", 0);
        assert_eq!(chan.mode_string(), ("+".to_string(), vec![]));
        assert_eq!(chan.kind(), ChannelKind::Public);
    }

    #[test]
    fn mode_string_orders_flags_then_limit_then_key() {
        let mut chan = Channel::new("#a", 0);
        chan.flags.set('t', true);
        chan.flags.set('n', true);
        chan.key = Some("secret".into());
        chan.limit = Some(5);
        assert_eq!(
            chan.mode_string(),
            ("+ntlk".to_string(), vec!["5".to_string(), "secret".to_string()])
        );
    }

    #[test]
    fn flag_set_reports_changes() {
        let mut flags = ChannelFlags::default();
        assert_eq!(flags.set('m', true), Some(true));
        assert_eq!(flags.set('m', true), Some(false));
        assert_eq!(flags.set('z', true), None);
        assert_eq!(flags.get('m'), Some(true));
    }

    #[test]
    fn roster_membership() {
        let mut chan = Channel::new("#a", 0);
        chan.add_member(uid(1), MemberModes { op: true, voice: false });
        chan.add_member(uid(1), MemberModes::default());
        chan.add_member(uid(2), MemberModes::default());
        assert_eq!(chan.members.len(), 2);
        assert!(chan.is_op(uid(1)));
        assert!(!chan.is_op(uid(2)));
        assert!(chan.remove_member(uid(1)));
        assert!(!chan.remove_member(uid(1)));
        assert!(!chan.is_empty());
    }

    #[test]
    fn limit_counts_members() {
        let mut chan = Channel::new("#a", 0);
        chan.limit = Some(1);
        assert!(!chan.is_full());
        chan.add_member(uid(1), MemberModes::default());
        assert!(chan.is_full());
    }

    #[test]
    fn bans_respect_exceptions_and_ignore_malformed_masks() {
        let mut chan = Channel::new("#a", 0);
        let entry = |mask: &str| ListEntry {
            mask: mask.into(),
            set_by: "op".into(),
            set_at: 0,
        };
        chan.bans.push(entry("garbage"));
        assert!(!chan.is_banned("eve", "e", "1.2.3.4"));
        chan.bans.push(entry("*!*@1.2.3.*"));
        assert!(chan.is_banned("eve", "e", "1.2.3.4"));
        chan.excepts.push(entry("eve!*@*"));
        assert!(chan.is_excepted("eve", "e", "1.2.3.4"));
        assert!(!chan.is_excepted("mallory", "m", "1.2.3.4"));
    }

    #[test]
    fn broadcast_skips_excluded_member() {
        let mut sessions = HashMap::new();
        let mut receivers = Vec::new();
        let mut chan = Channel::new("#a", 0);
        for n in 1..=3 {
            let (tx, rx) = mpsc::unbounded_channel();
            sessions.insert(
                uid(n),
                Session::new(
                    uid(n),
                    TransportKind::ByteStream,
                    "h".into(),
                    tx,
                    CancellationToken::new(),
                ),
            );
            chan.add_member(uid(n), MemberModes::default());
            receivers.push(rx);
        }
        let reply = Reply::Error(ErrorEvent {
            message: "x".into(),
        });
        chan.broadcast(&sessions, &reply, Some(uid(2)));
        assert!(receivers[0].try_recv().is_ok());
        assert!(receivers[1].try_recv().is_err());
        assert!(receivers[2].try_recv().is_ok());
    }
}

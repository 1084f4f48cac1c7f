//! Reply builders shared by several handlers.

use dualirc_proto::reply::{NameEntry, NamesReply};
use dualirc_proto::{Numeric, NumericReply};

use crate::state::{Channel, Matrix, Uid};

/// Whether `uid` may see `channel` in listings and queries.
pub fn channel_visible(channel: &Channel, uid: Uid) -> bool {
    !channel.is_hidden() || channel.is_member(uid)
}

/// RPL_NAMREPLY for one channel as seen by `requester`.
///
/// Invisible users are left out unless the requester is on the channel.
pub fn names_reply(matrix: &Matrix, channel: &Channel, requester: Uid, to: &str) -> NamesReply {
    let member_view = channel.is_member(requester);
    let names = channel
        .members
        .iter()
        .filter_map(|m| matrix.sessions.get(&m.uid).map(|s| (m, s)))
        .filter(|(_, s)| member_view || !s.modes.invisible)
        .map(|(m, s)| NameEntry {
            nick: s.display_nick().to_owned(),
            operator: m.modes.op,
            voice: m.modes.voice,
            user: s.username().to_owned(),
            host: s.host.clone(),
        })
        .collect();
    NamesReply {
        to: to.to_owned(),
        kind: channel.kind(),
        channel: channel.name.clone(),
        names,
    }
}

pub fn end_of_names(to: &str, channel: &str) -> NumericReply {
    NumericReply::new(Numeric::RPL_ENDOFNAMES, to).param(channel)
}

/// RPL_TOPIC, or `None` when no topic is set.
pub fn topic_reply(to: &str, channel: &Channel) -> Option<NumericReply> {
    channel.topic.as_ref().map(|topic| {
        NumericReply::new(Numeric::RPL_TOPIC, to)
            .param(&channel.name)
            .text(&topic.text)
    })
}

/// Fold an optional payload string to `None` when blank.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Successive `(sign, letter, param)` changes rendered as `+nt-k key`.
#[derive(Debug, Default)]
pub struct ModeChanges {
    changes: Vec<(bool, char, Option<String>)>,
}

impl ModeChanges {
    pub fn push(&mut self, on: bool, letter: char, param: Option<String>) {
        self.changes.push((on, letter, param));
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn render(&self) -> (String, Vec<String>) {
        let mut modes = String::new();
        let mut params = Vec::new();
        let mut sign = None;
        for (on, letter, param) in &self.changes {
            if sign != Some(*on) {
                modes.push(if *on { '+' } else { '-' });
                sign = Some(*on);
            }
            modes.push(*letter);
            if let Some(p) = param {
                params.push(p.clone());
            }
        }
        (modes, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_changes_collapse_repeated_signs() {
        let mut changes = ModeChanges::default();
        changes.push(true, 'n', None);
        changes.push(true, 't', None);
        changes.push(false, 'k', Some("old".into()));
        changes.push(true, 'l', Some("5".into()));
        assert_eq!(
            changes.render(),
            ("+nt-k+l".to_string(), vec!["old".to_string(), "5".to_string()])
        );
    }

    #[test]
    fn blank_strings_are_absent() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some("hi".into())), Some("hi".into()));
        assert_eq!(non_empty(None), None);
    }
}

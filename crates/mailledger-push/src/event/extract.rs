//! Per-event field extraction.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::kind::EventKind;
use crate::flags::{Flag, parse_flag_names};
use crate::record::{RawEventRecord, value_text};

/// Space-separated flag names of `FlagsSet`/`FlagsClear`.
const FLAG_NAMES: &str = "flagNames";
/// UID set of the source messages of a copy or move (Cyrus).
const OLD_UIDSET: &str = "vnd.cmu.oldUidset";
/// Per-message headers of `MessageNew` (Cyrus, not in RFC 5423).
const MESSAGE_HEADERS: &str = "messageHeaders";
const DISK_QUOTA: &str = "diskQuota";
const DISK_USED: &str = "diskUsed";
const MAX_MESSAGES: &str = "maxMessages";

/// Subject and sender of a newly delivered message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageHeaders {
    /// `Subject` header.
    pub subject: Option<String>,
    /// `From` header.
    pub from: Option<String>,
}

/// Fields specific to one event type.
///
/// An all-`None` value is a valid result: the event name alone is the
/// whole payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventDetails {
    /// Replacement event name, for events that are really another one.
    #[serde(skip)]
    pub event: Option<EventKind>,
    /// Flags set or cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<Flag>>,
    /// Headers of new messages, keyed by UID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, MessageHeaders>>,
    /// UID set of the messages in their source mailbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_uidset: Option<String>,
    /// Storage quota limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<i64>,
    /// Storage in use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<i64>,
    /// Message count limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<i64>,
}

impl EventDetails {
    /// Returns true if no event-specific field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.event.is_none()
            && self.flags.is_none()
            && self.headers.is_none()
            && self.old_uidset.is_none()
            && self.quota.is_none()
            && self.used.is_none()
            && self.messages.is_none()
    }
}

/// Runs the extractor registered for `kind`.
///
/// Returns `None` for unknown events and for the event types that are
/// recognized but not supported.
#[must_use]
pub fn extract(kind: &EventKind, record: RawEventRecord<'_>) -> Option<EventDetails> {
    match kind {
        EventKind::FlagsClear | EventKind::FlagsSet => Some(flags_changed(record)),
        EventKind::MailboxCreate
        | EventKind::MailboxDelete
        | EventKind::MailboxRename
        | EventKind::MailboxSubscribe
        | EventKind::MailboxUnSubscribe
        | EventKind::MessageAppend
        | EventKind::MessageExpunge => Some(EventDetails::default()),
        EventKind::MessageCopy | EventKind::MessageMove => Some(message_copied(record)),
        EventKind::MessageNew => Some(message_new(record)),
        EventKind::MessageRead => Some(flags_alias(Flag::Seen)),
        EventKind::MessageTrash => Some(flags_alias(Flag::Deleted)),
        EventKind::QuotaChange | EventKind::QuotaWithin => Some(quota_changed(record)),
        EventKind::AclChange
        | EventKind::Login
        | EventKind::Logout
        | EventKind::MessageExpire
        | EventKind::QuotaExceed
        | EventKind::Unknown(_) => None,
    }
}

fn flags_changed(record: RawEventRecord<'_>) -> EventDetails {
    let flags = record.str(FLAG_NAMES).map(parse_flag_names).unwrap_or_default();
    EventDetails {
        flags: Some(flags),
        ..EventDetails::default()
    }
}

/// `MessageRead` and `MessageTrash` are a `FlagsSet` of a single flag.
fn flags_alias(flag: Flag) -> EventDetails {
    EventDetails {
        event: Some(EventKind::FlagsSet),
        flags: Some(vec![flag]),
        ..EventDetails::default()
    }
}

fn message_copied(record: RawEventRecord<'_>) -> EventDetails {
    EventDetails {
        old_uidset: record.text(OLD_UIDSET),
        ..EventDetails::default()
    }
}

fn message_new(record: RawEventRecord<'_>) -> EventDetails {
    let headers = match record.get(MESSAGE_HEADERS) {
        Some(Value::Object(by_uid)) => by_uid
            .iter()
            .map(|(uid, h)| (uid.clone(), message_headers(h)))
            .collect(),
        Some(Value::Array(list)) => list
            .iter()
            .enumerate()
            .map(|(i, h)| (i.to_string(), message_headers(h)))
            .collect(),
        _ => BTreeMap::new(),
    };
    EventDetails {
        headers: Some(headers),
        ..EventDetails::default()
    }
}

fn message_headers(value: &Value) -> MessageHeaders {
    MessageHeaders {
        subject: value.get("Subject").and_then(value_text),
        from: value.get("From").and_then(value_text),
    }
}

fn quota_changed(record: RawEventRecord<'_>) -> EventDetails {
    EventDetails {
        quota: record.int(DISK_QUOTA),
        used: record.int(DISK_USED),
        messages: record.int(MAX_MESSAGES),
        ..EventDetails::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(kind: EventKind, value: &Value) -> Option<EventDetails> {
        extract(&kind, RawEventRecord::from_value(value).unwrap())
    }

    #[test]
    fn flags_from_flag_names() {
        let value = json!({"flagNames": "\\Seen $Work"});
        let details = run(EventKind::FlagsClear, &value).unwrap();
        assert_eq!(
            details.flags,
            Some(vec![Flag::Seen, Flag::Keyword("$Work".to_string())])
        );
        assert!(details.event.is_none());
    }

    #[test]
    fn flags_missing_names_is_empty_list() {
        let details = run(EventKind::FlagsSet, &json!({})).unwrap();
        assert_eq!(details.flags, Some(Vec::new()));
    }

    #[test]
    fn mailbox_events_are_empty() {
        for kind in [
            EventKind::MailboxCreate,
            EventKind::MailboxDelete,
            EventKind::MailboxRename,
            EventKind::MailboxSubscribe,
            EventKind::MailboxUnSubscribe,
            EventKind::MessageAppend,
            EventKind::MessageExpunge,
        ] {
            let details = run(kind, &json!({"flagNames": "\\Seen"})).unwrap();
            assert!(details.is_empty());
        }
    }

    #[test]
    fn copy_and_move_share_extractor() {
        let value = json!({"vnd.cmu.oldUidset": "4:7"});
        let copy = run(EventKind::MessageCopy, &value).unwrap();
        let moved = run(EventKind::MessageMove, &value).unwrap();
        assert_eq!(copy.old_uidset.as_deref(), Some("4:7"));
        assert_eq!(copy, moved);
    }

    #[test]
    fn new_message_headers() {
        let value = json!({
            "messageHeaders": {
                "12": {"Subject": "Hello", "From": "ann@example.org"},
                "13": {"Subject": "No sender"},
            }
        });
        let headers = run(EventKind::MessageNew, &value).unwrap().headers.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["12"].subject.as_deref(), Some("Hello"));
        assert_eq!(headers["12"].from.as_deref(), Some("ann@example.org"));
        assert_eq!(headers["13"].from, None);
    }

    #[test]
    fn new_message_headers_as_list() {
        let value = json!({"messageHeaders": [{"Subject": "First"}, "garbage"]});
        let headers = run(EventKind::MessageNew, &value).unwrap().headers.unwrap();
        assert_eq!(headers["0"].subject.as_deref(), Some("First"));
        assert_eq!(headers["1"], MessageHeaders::default());
    }

    #[test]
    fn new_message_without_headers() {
        let details = run(EventKind::MessageNew, &json!({})).unwrap();
        assert_eq!(details.headers, Some(BTreeMap::new()));

        let details = run(EventKind::MessageNew, &json!({"messageHeaders": null})).unwrap();
        assert_eq!(details.headers, Some(BTreeMap::new()));
    }

    #[test]
    fn read_and_trash_alias_flags_set() {
        let read = run(EventKind::MessageRead, &json!({})).unwrap();
        assert_eq!(read.event, Some(EventKind::FlagsSet));
        assert_eq!(read.flags, Some(vec![Flag::Seen]));

        let trash = run(EventKind::MessageTrash, &json!({})).unwrap();
        assert_eq!(trash.event, Some(EventKind::FlagsSet));
        assert_eq!(trash.flags, Some(vec![Flag::Deleted]));
    }

    #[test]
    fn quota_fields() {
        let value = json!({"diskQuota": 1000, "diskUsed": "250", "maxMessages": 50});
        let details = run(EventKind::QuotaWithin, &value).unwrap();
        assert_eq!(details.quota, Some(1000));
        assert_eq!(details.used, Some(250));
        assert_eq!(details.messages, Some(50));
    }

    #[test]
    fn quota_missing_fields_stay_absent() {
        let details = run(EventKind::QuotaChange, &json!({"diskQuota": 1000})).unwrap();
        assert_eq!(details.quota, Some(1000));
        assert_eq!(details.used, None);
        assert_eq!(details.messages, None);
    }

    #[test]
    fn unsupported_events_yield_nothing() {
        for kind in [
            EventKind::AclChange,
            EventKind::Login,
            EventKind::Logout,
            EventKind::MessageExpire,
            EventKind::QuotaExceed,
            EventKind::Unknown("Whatever".to_string()),
        ] {
            assert!(run(kind, &json!({"event": "x"})).is_none());
        }
    }

    #[test]
    fn registry_matches_is_implemented() {
        let value = json!({});
        for kind in EventKind::KNOWN {
            assert_eq!(run(kind.clone(), &value).is_some(), kind.is_implemented());
        }
    }
}

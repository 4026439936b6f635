//! Event normalization.
//!
//! [`Parser`] turns one raw notification into a [`NormalizedEvent`], or
//! into nothing when the record should be dropped:
//!
//! - the input is not an object, is empty, or has no `event` key
//! - the event name is unknown
//! - the event type is known but not supported (`Login`, `AclChange`, ...)
//!
//! Dropping is not an error. Servers add event types and vendor fields over
//! time and callers are expected to ignore what they cannot use.

mod extract;
mod kind;

use serde::Serialize;
use serde_json::Value;

pub use extract::{EventDetails, MessageHeaders, extract};
pub use kind::EventKind;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::record::RawEventRecord;
use crate::uri::decompose;

const EVENT: &str = "event";
const SERVICE: &str = "service";
const UIDSET: &str = "uidset";
const URI: &str = "uri";
const USER: &str = "user";
const MESSAGES: &str = "messages";
const OLD_MAILBOX_ID: &str = "oldMailboxID";
const UNSEEN_MESSAGES: &str = "vnd.cmu.unseenMessages";

/// Fields every normalized event carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommonFields {
    /// Event name without vendor prefix.
    pub event: String,
    /// Service that raised the event (e.g. `imap`, `lmtp`).
    pub service: Option<String>,
    /// UID set of the affected messages, not parsed further.
    pub uidset: Option<String>,
    /// Number of messages in the mailbox.
    pub exists: Option<i64>,
    /// Owner of the affected mailbox.
    pub folder_user: String,
    /// Affected mailbox.
    pub folder_name: String,
    /// Previous owner, for renames and moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_folder_user: Option<String>,
    /// Previous mailbox, for renames and moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_folder_name: Option<String>,
    /// Number of unseen messages (Cyrus).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unseen: Option<i64>,
}

impl CommonFields {
    /// Extracts the common fields of a record whose event name is `event`.
    #[must_use]
    pub fn extract(event: &str, record: RawEventRecord<'_>) -> Self {
        let user = record.str(USER);
        let uri = decompose(record.str(URI).unwrap_or_default());

        let mut common = Self {
            event: event.to_string(),
            service: record.text(SERVICE),
            uidset: record.text(UIDSET),
            exists: record.int(MESSAGES),
            folder_user: uri.user_or(user),
            folder_name: uri.folder,
            ..Self::default()
        };

        if record.contains(OLD_MAILBOX_ID) {
            let old = decompose(record.str(OLD_MAILBOX_ID).unwrap_or_default());
            common.old_folder_user = Some(old.user_or(user));
            common.old_folder_name = Some(old.folder);
        }

        common.unseen = record.int(UNSEEN_MESSAGES);
        common
    }
}

/// A notification reduced to the fields clients care about.
///
/// Serializes to a flat map: the common fields, followed by whichever
/// event-specific fields are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEvent {
    /// Fields present on every event.
    #[serde(flatten)]
    pub common: CommonFields,
    /// Fields specific to the event type.
    #[serde(flatten)]
    pub details: EventDetails,
}

impl NormalizedEvent {
    /// Merges event-specific fields over the common ones.
    ///
    /// An event override in `details` replaces the common event name.
    #[must_use]
    pub fn merge(mut common: CommonFields, mut details: EventDetails) -> Self {
        if let Some(alias) = details.event.take() {
            common.event = alias.as_str().to_string();
        }
        Self { common, details }
    }

    /// Returns the (possibly aliased) event name.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.common.event
    }

    /// Returns the event kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.common.event)
    }

    /// Returns the event as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// RFC 5423 notification parser.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a decoded notification.
    ///
    /// Returns `None` if the notification should be dropped.
    #[must_use]
    pub fn parse(&self, value: &Value) -> Option<NormalizedEvent> {
        let Some(record) = RawEventRecord::from_value(value) else {
            tracing::trace!("dropping non-object notification");
            return None;
        };
        self.parse_record(record)
    }

    /// Parses an already wrapped record.
    #[must_use]
    pub fn parse_record(&self, record: RawEventRecord<'_>) -> Option<NormalizedEvent> {
        if record.is_empty() {
            return None;
        }
        let raw_name = record.text(EVENT)?;
        let name = self.config.strip_prefix(&raw_name);

        let common = CommonFields::extract(name, record);

        let kind = EventKind::parse(name);
        if let EventKind::Unknown(name) = &kind {
            tracing::debug!(event = %name, "dropping unknown notification event");
            return None;
        }

        let Some(details) = extract(&kind, record) else {
            tracing::trace!(event = %kind, "notification event not supported");
            return None;
        };

        Some(NormalizedEvent::merge(common, details))
    }

    /// Decodes one JSON document and parses it.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON. Valid JSON that is
    /// not a usable notification yields `Ok(None)`.
    pub fn parse_json(&self, json: &str) -> Result<Option<NormalizedEvent>> {
        let value: Value = serde_json::from_str(json)?;
        Ok(self.parse(&value))
    }
}

/// Parses a decoded notification with the default configuration.
#[must_use]
pub fn parse(value: &Value) -> Option<NormalizedEvent> {
    Parser::default().parse(value)
}

//! # mailledger-push
//!
//! Parser for IMAP mailbox event notifications as defined by RFC 5423,
//! including the `vnd.cmu.` extensions sent by Cyrus IMAP.
//!
//! The transport (HTTP push, socket listener, ...) decodes the wire format
//! into a JSON value; this crate turns that value into a normalized event,
//! or tells the caller to drop it.
//!
//! ## Features
//!
//! - **Vendor prefix stripping**: `vnd.cmu.MessageMove` is handled as
//!   `MessageMove`
//! - **Event aliasing**: `MessageRead` and `MessageTrash` are reported as
//!   `FlagsSet` with `\Seen` and `\Deleted`
//! - **Mailbox URI decomposition**: both the RFC 5092 userinfo form and the
//!   Cyrus `user/<name>/<folder>` hierarchy
//! - **Never fails on event input**: unknown events, missing fields and
//!   malformed URIs degrade to "no result" or empty fields
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//!
//! let notification = json!({
//!     "event": "vnd.cmu.MessageRead",
//!     "service": "imap",
//!     "uidset": "42",
//!     "uri": "imap://test%40example.org@imap.example.org/INBOX",
//!     "messages": 5,
//! });
//!
//! let event = mailledger_push::parse(&notification).unwrap();
//! assert_eq!(event.event(), "FlagsSet");
//! assert_eq!(event.common.folder_user, "test@example.org");
//! assert_eq!(event.common.folder_name, "INBOX");
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Parser configuration
//! - [`event`]: Event kinds, extractors and the [`Parser`]
//! - [`flags`]: Message flags
//! - [`record`]: Lenient access to raw notification fields
//! - [`uri`]: Mailbox URI decomposition

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod event;
pub mod flags;
pub mod record;
pub mod uri;

pub use config::{ParserConfig, ParserConfigBuilder};
pub use error::{Error, Result};
pub use event::{
    CommonFields, EventDetails, EventKind, MessageHeaders, NormalizedEvent, Parser, parse,
};
pub use flags::Flag;
pub use record::RawEventRecord;
pub use uri::{MailboxUri, decompose};

//! Mailbox URI decomposition.
//!
//! Notifications name mailboxes with IMAP URLs, and servers disagree on
//! where the owning user goes:
//!
//! ```text
//! imap://test%40example.org@imap.example.org/INBOX        (userinfo, RFC 5092)
//! imap://imap.example.org/user/test.test/Sent%40example.org  (Cyrus hierarchy)
//! imap://imap.example.org/Folder                            (no user at all)
//! ```
//!
//! [`decompose`] accepts all three and never fails. Input it cannot make
//! sense of comes back with an empty user and/or folder.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use url::Url;

/// Folder reported when a user-rooted URI names no folder.
pub const DEFAULT_FOLDER: &str = "INBOX";

/// Leading path segment of the Cyrus user hierarchy.
const USER_ROOT: &str = "user/";

/// A mailbox URI split into its owner, folder and parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailboxUri {
    /// Owning user, empty when the URI does not name one.
    pub user: String,
    /// Folder path without a leading slash.
    pub folder: String,
    /// `;key=value` parameters following the path.
    pub params: BTreeMap<String, String>,
}

impl MailboxUri {
    /// Returns true if neither a user nor a folder could be extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.folder.is_empty()
    }

    /// Returns the owning user, or `fallback` when the URI named none.
    ///
    /// An empty user counts as missing.
    #[must_use]
    pub fn user_or(&self, fallback: Option<&str>) -> String {
        if self.user.is_empty() {
            fallback.unwrap_or_default().to_string()
        } else {
            self.user.clone()
        }
    }
}

/// Decomposes a mailbox URI into user, folder and parameters.
#[must_use]
pub fn decompose(uri: &str) -> MailboxUri {
    let (userinfo, full_path) = split_uri(uri);

    let (path, args) = match full_path.split_once(';') {
        Some((path, args)) => (path, Some(args)),
        None => (full_path, None),
    };
    let path = path.strip_prefix('/').unwrap_or(path);

    let (user, folder) = if !userinfo.is_empty() {
        let folder = if path.is_empty() {
            DEFAULT_FOLDER.to_string()
        } else {
            decode(path)
        };
        (decode(&userinfo), folder)
    } else if path.starts_with(USER_ROOT) {
        split_user_hierarchy(path)
    } else {
        (String::new(), decode(path))
    };

    let params = args.map(parse_params).unwrap_or_default();

    let decomposed = MailboxUri {
        user,
        folder,
        params,
    };
    if decomposed.is_empty() {
        tracing::trace!(uri, "mailbox URI names neither user nor folder");
    }
    decomposed
}

/// Returns the raw (still percent-encoded) userinfo name and path.
///
/// The path is sliced out of the input as written. Dot segments are not
/// resolved, so `user/joe/..` still names a folder `..` of `joe`.
fn split_uri(uri: &str) -> (String, &str) {
    // A bare mailbox name such as `INBOX` or `user/joe/Sent`.
    let Some((_, rest)) = uri.split_once("://") else {
        return (String::new(), strip_query(uri));
    };

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let path = if tail.starts_with('/') {
        strip_query(tail)
    } else {
        ""
    };

    let username = match Url::parse(uri) {
        Ok(url) => url.username().to_string(),
        Err(err) => {
            tracing::trace!(uri, %err, "malformed mailbox URI, reading authority as written");
            raw_username(authority).to_string()
        }
    };
    (username, path)
}

fn strip_query(s: &str) -> &str {
    s.find(['?', '#']).map_or(s, |end| &s[..end])
}

/// Userinfo name of an authority that the URL parser rejected.
fn raw_username(authority: &str) -> &str {
    authority
        .rsplit_once('@')
        .and_then(|(userinfo, _)| userinfo.split(':').next())
        .unwrap_or_default()
}

/// Splits a `user/<name>/<folder...>` path.
///
/// A domain may trail the last segment (`Sent@example.org`), in which
/// case it belongs to the user rather than the folder.
fn split_user_hierarchy(path: &str) -> (String, String) {
    let mut segments: Vec<String> = path.split('/').map(decode).collect();
    let mut user = segments.get(1).cloned().unwrap_or_default();

    let last = segments.len() - 1;
    if last > 1 {
        let tail = &mut segments[last];
        if let Some(pos) = tail.rfind('@').filter(|&pos| pos > 0) {
            user.push_str(&tail[pos..]);
            tail.truncate(pos);
        }
    }

    let folder = segments.get(2..).map(|rest| rest.join("/")).unwrap_or_default();
    if folder.is_empty() {
        (user, DEFAULT_FOLDER.to_string())
    } else {
        (user, folder)
    }
}

/// Parses a `key=value;key=value` parameter suffix.
fn parse_params(args: &str) -> BTreeMap<String, String> {
    args.split(';')
        // RFC 5092 separates parameters with "/;", e.g. `;UIDVALIDITY=1/;UID=2`.
        .map(|arg| arg.strip_suffix('/').unwrap_or(arg))
        .filter(|arg| !arg.is_empty())
        .map(|arg| {
            let (key, value) = arg.split_once('=').unwrap_or((arg, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

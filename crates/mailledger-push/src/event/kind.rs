//! Event names defined by RFC 5423, plus the Cyrus additions.

/// A notification event type.
///
/// Names are matched case-sensitively after the vendor prefix has been
/// stripped. Anything else is kept as [`EventKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Access rights on a mailbox changed.
    AclChange,
    /// Flags were removed from messages.
    FlagsClear,
    /// Flags were added to messages.
    FlagsSet,
    /// A user logged in.
    Login,
    /// A user logged out.
    Logout,
    /// A mailbox was created.
    MailboxCreate,
    /// A mailbox was deleted.
    MailboxDelete,
    /// A mailbox was renamed.
    MailboxRename,
    /// A mailbox was subscribed to.
    MailboxSubscribe,
    /// A mailbox was unsubscribed from.
    MailboxUnSubscribe,
    /// A message was appended to a mailbox.
    MessageAppend,
    /// Messages were copied into a mailbox.
    MessageCopy,
    /// Messages expired.
    MessageExpire,
    /// Messages were expunged.
    MessageExpunge,
    /// Messages were moved into a mailbox (Cyrus extension).
    MessageMove,
    /// A new message was delivered.
    MessageNew,
    /// A message was read.
    MessageRead,
    /// A message was marked for deletion.
    MessageTrash,
    /// Quota usage changed.
    QuotaChange,
    /// Quota was exceeded.
    QuotaExceed,
    /// Usage went back under quota.
    QuotaWithin,
    /// An event name this parser does not know.
    Unknown(String),
}

impl EventKind {
    /// Every known event kind.
    pub const KNOWN: [Self; 21] = [
        Self::AclChange,
        Self::FlagsClear,
        Self::FlagsSet,
        Self::Login,
        Self::Logout,
        Self::MailboxCreate,
        Self::MailboxDelete,
        Self::MailboxRename,
        Self::MailboxSubscribe,
        Self::MailboxUnSubscribe,
        Self::MessageAppend,
        Self::MessageCopy,
        Self::MessageExpire,
        Self::MessageExpunge,
        Self::MessageMove,
        Self::MessageNew,
        Self::MessageRead,
        Self::MessageTrash,
        Self::QuotaChange,
        Self::QuotaExceed,
        Self::QuotaWithin,
    ];

    /// Parses an event name with the vendor prefix already removed.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "AclChange" => Self::AclChange,
            "FlagsClear" => Self::FlagsClear,
            "FlagsSet" => Self::FlagsSet,
            "Login" => Self::Login,
            "Logout" => Self::Logout,
            "MailboxCreate" => Self::MailboxCreate,
            "MailboxDelete" => Self::MailboxDelete,
            "MailboxRename" => Self::MailboxRename,
            "MailboxSubscribe" => Self::MailboxSubscribe,
            "MailboxUnSubscribe" => Self::MailboxUnSubscribe,
            "MessageAppend" => Self::MessageAppend,
            "MessageCopy" => Self::MessageCopy,
            "MessageExpire" => Self::MessageExpire,
            "MessageExpunge" => Self::MessageExpunge,
            "MessageMove" => Self::MessageMove,
            "MessageNew" => Self::MessageNew,
            "MessageRead" => Self::MessageRead,
            "MessageTrash" => Self::MessageTrash,
            "QuotaChange" => Self::QuotaChange,
            "QuotaExceed" => Self::QuotaExceed,
            "QuotaWithin" => Self::QuotaWithin,
            _ => Self::Unknown(name.to_string()),
        }
    }

    /// Returns the event name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AclChange => "AclChange",
            Self::FlagsClear => "FlagsClear",
            Self::FlagsSet => "FlagsSet",
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::MailboxCreate => "MailboxCreate",
            Self::MailboxDelete => "MailboxDelete",
            Self::MailboxRename => "MailboxRename",
            Self::MailboxSubscribe => "MailboxSubscribe",
            Self::MailboxUnSubscribe => "MailboxUnSubscribe",
            Self::MessageAppend => "MessageAppend",
            Self::MessageCopy => "MessageCopy",
            Self::MessageExpire => "MessageExpire",
            Self::MessageExpunge => "MessageExpunge",
            Self::MessageMove => "MessageMove",
            Self::MessageNew => "MessageNew",
            Self::MessageRead => "MessageRead",
            Self::MessageTrash => "MessageTrash",
            Self::QuotaChange => "QuotaChange",
            Self::QuotaExceed => "QuotaExceed",
            Self::QuotaWithin => "QuotaWithin",
            Self::Unknown(name) => name,
        }
    }

    /// Returns true for event kinds that produce a normalized record.
    ///
    /// Unknown events and the kinds without an extractor are dropped.
    #[must_use]
    pub const fn is_implemented(&self) -> bool {
        !matches!(
            self,
            Self::AclChange
                | Self::Login
                | Self::Logout
                | Self::MessageExpire
                | Self::QuotaExceed
                | Self::Unknown(_)
        )
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

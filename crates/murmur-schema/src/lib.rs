use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted message in a user's conversation, either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user_id: String,
    pub role: ChatRole,
    pub message: String,
    /// Assigned by the store at insert time.
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Bot => "bot",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ChatRole::User),
            "bot" => Some(ChatRole::Bot),
            _ => None,
        }
    }

    /// Speaker label used when rendering a turn into prompt text.
    pub fn display_name(self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Bot => "Bot",
        }
    }
}

/// A user's recorded answer to the terms-of-use prompt. A user with no
/// record at all gates exactly like `Declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    Agreed,
    Declined,
}

impl ConsentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsentStatus::Agreed => "agreed",
            ConsentStatus::Declined => "declined",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "agreed" => Some(ConsentStatus::Agreed),
            "declined" => Some(ConsentStatus::Declined),
            _ => None,
        }
    }

    pub fn allows_commands(self) -> bool {
        matches!(self, ConsentStatus::Agreed)
    }
}

/// A styled user-visible reply. The channel glue decides how a notice is
/// rendered (embed color, cleared components); the core only picks the
/// kind and the words.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: Option<String>,
    pub body: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            body: body.into(),
        }
    }

    pub fn titled(kind: NoticeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: Some(title.into()),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Failure,
    Cancelled,
    TimedOut,
}

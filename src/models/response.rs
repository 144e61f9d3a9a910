use serde::{Deserialize, Serialize};

/// Body accepted by `POST /send_command`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendCommandRequest {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub chat_id: Option<ChatTarget>,
}

/// A chat id as sent by callers: either the numeric Telegram id or a
/// string, which may hold a number or an `@channel` username.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Id(i64),
    Name(String),
}

impl ChatTarget {
    pub fn is_blank(&self) -> bool {
        match self {
            ChatTarget::Id(id) => *id == 0,
            ChatTarget::Name(name) => name.trim().is_empty(),
        }
    }
}

impl SendCommandRequest {
    /// Both fields present and not blank, or `None`.
    pub fn validated(self) -> Option<(String, ChatTarget)> {
        let command = self.command.filter(|c| !c.trim().is_empty())?;
        let chat_id = self.chat_id.filter(|c| !c.is_blank())?;
        Some((command, chat_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

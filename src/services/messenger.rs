use crate::models::response::ChatTarget;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use teloxide::RequestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Telegram rejected the message: {0}")]
    Telegram(#[from] RequestError),
}

/// Outbound plain-text delivery into a chat.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(&self, chat: ChatTarget, text: String) -> Result<(), RelayError>;
}

impl From<ChatTarget> for Recipient {
    fn from(target: ChatTarget) -> Self {
        match target {
            ChatTarget::Id(id) => Recipient::Id(ChatId(id)),
            ChatTarget::Name(name) => match name.trim().parse::<i64>() {
                Ok(id) => Recipient::Id(ChatId(id)),
                Err(_) => Recipient::ChannelUsername(name),
            },
        }
    }
}

#[async_trait]
impl MessageSender for Bot {
    async fn send_text(&self, chat: ChatTarget, text: String) -> Result<(), RelayError> {
        self.send_message(Recipient::from(chat), text).await?;
        Ok(())
    }
}

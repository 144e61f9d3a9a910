use super::keyboard::pager_keyboard;
use super::Command;
use crate::models::pagination::PagerAction;
use crate::services::router::{CommandRouter, Reply};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, Message, MessageId};
use teloxide::utils::command::BotCommands;
use teloxide::RequestError;
use tracing::{error, info, warn};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

/// Where a rendered reply ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Post a new message in the chat.
    Send(ChatId),
    /// Replace the text and keyboard of a message the bot already sent.
    Edit(ChatId, MessageId),
}

pub async fn deliver(bot: &Bot, delivery: Delivery, reply: &Reply) -> Result<(), RequestError> {
    let keyboard = pager_keyboard(&reply.pager);

    match delivery {
        Delivery::Send(chat_id) => {
            let mut request = bot.send_message(chat_id, reply.text.clone());
            if let Some(keyboard) = keyboard {
                request = request.reply_markup(keyboard);
            }
            request.await?;
        }
        Delivery::Edit(chat_id, message_id) => {
            let mut request = bot.edit_message_text(chat_id, message_id, reply.text.clone());
            if let Some(keyboard) = keyboard {
                request = request.reply_markup(keyboard);
            }
            request.await?;
        }
    }

    Ok(())
}

async fn deliver_logged(bot: &Bot, delivery: Delivery, reply: &Reply) {
    if let Err(e) = deliver(bot, delivery, reply).await {
        error!("Failed to deliver reply ({:?}): {}", delivery, e);
    }
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    router: Arc<CommandRouter>,
) -> HandlerResult {
    info!("Chat {} invoked {:?}", msg.chat.id, cmd);

    let reply = match cmd {
        Command::Start => router.start(),
        Command::Help => Reply::text(Command::descriptions().to_string()),
        Command::Countries(args) => router.countries(&args).await,
        Command::States(args) => router.states(&args).await,
        Command::Cities(args) => router.cities(&args).await,
    };

    deliver_logged(&bot, Delivery::Send(msg.chat.id), &reply).await;
    Ok(())
}

pub async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    router: Arc<CommandRouter>,
) -> HandlerResult {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!("Failed to answer callback query: {}", e);
    }

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };

    let action = match data.parse::<PagerAction>() {
        Ok(action) => action,
        Err(e) => {
            warn!("Ignoring callback '{}': {}", data, e);
            return Ok(());
        }
    };

    let Some(message) = query.message.as_ref() else {
        warn!("Callback '{}' arrived without its message", data);
        return Ok(());
    };

    let reply = router.countries_page(action.target_page()).await;
    deliver_logged(&bot, Delivery::Edit(message.chat().id, message.id()), &reply).await;
    Ok(())
}

//! Telegram side of the bot: command definitions, dispatch tree and
//! delivery of rendered replies.

pub mod handlers;
pub mod keyboard;

use crate::services::router::CommandRouter;
use handlers::{handle_callback, handle_command, HandlerError};
use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message.")]
    Start,
    #[command(description = "display this text.")]
    Help,
    #[command(description = "list countries, 50 per page: /countries [page]")]
    Countries(String),
    #[command(description = "list the states of a country: /states <country_code>")]
    States(String),
    #[command(description = "list the cities of a state: /cities <country_code> <state_code>")]
    Cities(String),
}

pub fn schema() -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

/// Registers the command menu shown by Telegram clients.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(vec![
        BotCommand::new("start", "show the welcome message"),
        BotCommand::new("help", "list the available commands"),
        BotCommand::new("countries", "list countries, 50 per page"),
        BotCommand::new("states", "list the states of a country"),
        BotCommand::new("cities", "list the cities of a state"),
    ])
    .await?;

    Ok(())
}

/// Long-polls Telegram until Ctrl+C.
pub async fn run(bot: Bot, router: Arc<CommandRouter>) {
    if let Err(e) = setup_bot_commands(&bot).await {
        warn!("Failed to register bot commands: {}", e);
    }

    info!("Bot is polling for updates");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![router])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

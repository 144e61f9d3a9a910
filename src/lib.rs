//! geobot - Telegram bot browsing countries, states and cities
//!
//! This library provides the location API client, the command router that
//! renders paginated listings, the Telegram dispatch tree and the HTTP relay
//! that pushes text into chats.

pub mod api;
pub mod bot;
pub mod cli;
pub mod config;
pub mod models;
pub mod services;

use services::messenger::MessageSender;
use std::sync::Arc;

/// Shared state of the relay server.
#[derive(Clone)]
pub struct AppState {
    pub sender: Arc<dyn MessageSender>,
}

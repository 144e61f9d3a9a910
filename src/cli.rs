use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "geobot",
    about = "Telegram bot for browsing countries, states and cities",
    version,
    author
)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Poll Telegram and answer /countries, /states and /cities
    Bot,
    /// Serve POST /send_command, forwarding text into a chat
    Relay {
        /// Port to listen on, overrides RELAY_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
}

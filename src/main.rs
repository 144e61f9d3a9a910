use anyhow::Context;
use clap::Parser;
use geobot::{
    api::relay_router,
    bot,
    cli::{Args, Mode},
    config::Config,
    services::{location::LocationClient, router::CommandRouter},
    AppState,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use teloxide::Bot;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.mode {
        Mode::Bot => run_bot(config).await,
        Mode::Relay { port } => {
            let port = port.unwrap_or(config.relay_port);
            run_relay(&config, port).await
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn create_bot(config: &Config) -> Bot {
    let bot = Bot::new(config.telegram_token.expose_secret());
    match &config.telegram_api_url {
        Some(url) => {
            info!("Using custom Bot API URL: {}", url);
            bot.set_api_url(url.clone())
        }
        None => bot,
    }
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    info!("Location API: {}", config.location_api_url);

    let telegram = create_bot(&config);
    let locations = Arc::new(LocationClient::new(
        config.location_api_url,
        config.location_api_key,
    ));
    let router = Arc::new(CommandRouter::new(locations));

    bot::run(telegram, router).await;
    Ok(())
}

async fn run_relay(config: &Config, port: u16) -> anyhow::Result<()> {
    let app_state = AppState {
        sender: Arc::new(create_bot(config)),
    };
    let app = relay_router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind relay port {}", port))?;

    info!("Relay listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("relay server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}

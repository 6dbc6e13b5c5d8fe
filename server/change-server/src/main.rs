use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use change_server::{create_app, ChangeServer, ServerConfig};
use error_common::{log_fatal, Result, ServiceError};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();
    let config = ServerConfig::parse();

    init_tracing(&config)?;

    if let Err(e) = run(config).await {
        log_fatal("change-server", &e);
        return Err(e);
    }

    Ok(())
}

async fn run(config: ServerConfig) -> Result<()> {
    info!("{}", "Starting API server".bright_cyan());
    info!(version = env!("CARGO_PKG_VERSION"), port = config.port, "Server configuration loaded");

    let (host, port) = config.bind_target();
    let listener = tokio::net::TcpListener::bind((host, port)).await.map_err(|e| {
        ServiceError::Network(format!("Failed to bind to {}:{}: {}", host, port, e))
    })?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServiceError::Network(format!("Failed to read bound address: {}", e)))?;

    let app = create_app(ChangeServer::with_tracing(config));

    info!("{}", format!("Change server running on http://{}", addr).bright_green());
    info!("{}", format!("Health check available at: http://{}/health", addr).bright_blue());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| ServiceError::Server(format!("HTTP server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

fn init_tracing(config: &ServerConfig) -> Result<()> {
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let use_colors = std::env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("change_server={},tower_http=info,hyper=info", level).into()
    });

    let result = if config.is_development() && use_colors {
        // Human-readable development logging
        let result = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(true)
                    .with_level(true),
            )
            .try_init();

        print_startup_banner();
        result
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
    };

    result.context("Failed to initialize tracing")?;
    Ok(())
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║             CHANGE INTAKE SERVER         ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════╝".bright_cyan());
    println!();
}

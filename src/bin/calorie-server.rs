// ABOUTME: Server binary for the meal calorie estimation API
// ABOUTME: Loads .env and configuration, initializes logging, and serves the axum app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Calorie Server Binary
//!
//! ```bash
//! calorie-server --http-port 8080
//! calorie-server --issue-token user@example.com   # print a bearer token and exit
//! ```

use anyhow::Result;
use calorie_service::{
    config::environment::ServerConfig, logging, resources::ServerResources, routes,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "calorie-server")]
#[command(about = "Meal calorie estimation API backed by USDA FoodData Central")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Print an access token for the given email and exit
    #[arg(long, value_name = "EMAIL")]
    issue_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = dotenvy::dotenv() {
        // Logging is not up yet
        eprintln!("No .env file loaded: {e}");
    }

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    if let Some(subject) = args.issue_token {
        let auth_manager = calorie_service::auth::AuthManager::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_minutes,
        );
        println!("{}", auth_manager.generate_token(&subject)?);
        return Ok(());
    }

    info!("Configuration: {}", config.summary());

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(config)?);
    let app = routes::app(resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Calorie server listening on http://{addr}");
    info!("   Calorie lookup:  POST http://{addr}/get-calories");
    info!("   Health Check:    GET  http://{addr}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Calorie server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

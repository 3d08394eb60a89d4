// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use axum::http::HeaderName;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use server::{config::ServerConfig, database, routes};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting up the server...");

    let config = ServerConfig::from_env();

    let db_pool = match database::establish_connection_pool(&config.database_url).await {
        Ok(pool) => {
            tracing::info!("Database connection was made successfully.");
            pool
        }
        Err(e) => {
            tracing::error!("Failed to connect with the database: {:?}", e);
            std::process::exit(1);
        }
    };

    let app_routes = routes::create_router(db_pool);

    // The calendar front end runs on another origin, so CORS stays open.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_origin(Any);

    let app = app_routes.layer(cors).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST and PORT must form a valid socket address");
    tracing::info!("The server listens on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

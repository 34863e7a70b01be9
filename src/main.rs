mod config;
mod error;
mod orchestrator;
mod prompt;
mod relay;
mod upstream;
mod web;

use actix_files as fs;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;

use config::Config;
use orchestrator::Orchestrator;
use relay::Relay;
use upstream::{GoogleClient, Upstream};
use web::{handlers, routes};

// App state structure
pub struct AppState {
    relay: Relay,
    orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(api_key: Option<String>, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            relay: Relay::new(api_key.clone(), upstream.clone()),
            orchestrator: Orchestrator::new(api_key, upstream),
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting image relay");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.api_key.is_none() {
        error!("GOOGLE_API_KEY is not set; image endpoints will answer 500 until it is configured");
    }

    let upstream: Arc<dyn Upstream> = Arc::new(GoogleClient::new(&config));
    let app_state = Data::new(AppState::new(config.api_key.clone(), upstream));

    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if serve_static {
        info!("Serving static files from {}", static_dir.display());
    } else {
        warn!("Static directory {} not found, only the API is served", static_dir.display());
    }

    let json_limit = config.json_limit;
    let cors_origins = config.cors_origins.clone();
    if cors_origins.is_empty() {
        info!("CORS: allowing any origin");
    } else {
        info!("CORS: allowing {}", cors_origins.join(", "));
    }

    info!("Proxy server listening at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let app = App::new()
            .wrap(Logger::default())
            .wrap(routes::cors(&cors_origins))
            .app_data(app_state.clone())
            .app_data(handlers::json_config(json_limit))
            .configure(routes::configure);

        if serve_static {
            app.service(fs::Files::new("/", static_dir.clone()).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

use crate::app::App;
use crate::config::ConsoleConfig;
use crate::gateway::HttpGateway;
use crate::router::handle;
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod console;
mod errors;
mod gateway;
mod responses;
mod router;
mod spreadsheets;
mod templates;


fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1️⃣ Configuration
    let config = match ConsoleConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ API client
    let gateway = match HttpGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("could not build API client: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr = config.bind_addr;
    let workers = config.max_workers;
    info!(%addr, api = %config.api_base_url, "starting console");

    let app = App::new(config, Box::new(gateway));
    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}

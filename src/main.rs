mod api;
mod bid;
mod blockchain;
mod config;
mod error;
mod network;
mod node;

use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenvy::dotenv;
use log::{info, warn};

use api::AppState;
use config::NodeConfig;
use network::HttpPeerClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = NodeConfig::from_env();
    let client = HttpPeerClient::new(cfg.peer_timeout).map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState::new(cfg.node_url.clone(), client));

    println!("⛓️ Starting bid ledger node at {}", state.own_url());

    let server = HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .wrap(Logger::default())
                .app_data(state.clone())
                .configure(api::init_routes)
        }
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run();

    if let Some(seed) = cfg.seed_node.as_deref() {
        // The seed calls back into our bulk endpoint, so the server must be
        // accepting connections before we announce ourselves.
        let state = state.clone();
        let seed = seed.to_string();
        actix_web::rt::spawn(async move {
            match state.join_network(&seed).await {
                Ok(()) => info!("PEERS - joined network through {seed}"),
                Err(e) => warn!("PEERS - could not join through {seed}: {e}"),
            }
        });
    }

    server.await
}

use actix_web::{App, HttpServer, middleware::Logger, web};
use log::info;

use pow_ledger::api::{self, AppState};
use pow_ledger::blockchain::DIFFICULTY;
use pow_ledger::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();
    env_logger::init();

    // Ledger (with genesis) -> coordinator -> serve.
    let state = web::Data::new(AppState::new(DIFFICULTY));
    info!("node {} ready (difficulty={DIFFICULTY})", state.node_id);

    println!(
        "⛓️ Starting proof-of-work ledger at http://{}:{}",
        config.host, config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

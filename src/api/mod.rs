mod chain;
mod health;
mod mining;
pub mod models;
mod tx;

use actix_web::HttpResponse;
use actix_web::error::InternalError;
use actix_web::web::{self, ServiceConfig};

pub use models::{
    AppState, ChainResponse, ForgedResponse, HealthResponse, MessageResponse, QueuedTxResponse,
    SubmitRequest, ValidateResponse,
};

/// Undecodable JSON bodies get the same `{message}` shape as other rejections.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = MessageResponse::new(format!("Malformed request: {err}"));
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::health_check)
        .service(chain::last_block)
        .service(chain::get_chain)
        .service(chain::validate_chain)
        .service(mining::submit_proof)
        .service(tx::new_transaction);
}

use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use super::models::{AppState, ChainResponse, MessageResponse, ValidateResponse};

/// Get the current tip.
#[get("/last_block")]
pub async fn last_block(state: web::Data<AppState>) -> impl Responder {
    match state.coordinator.tip() {
        Ok(block) => HttpResponse::Ok().json(block),
        Err(e) => {
            error!("GET /last_block - ledger fault: {e}");
            HttpResponse::InternalServerError().json(MessageResponse::new(e.to_string()))
        }
    }
}

/// Get the full blockchain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.coordinator.snapshot();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Validate the whole chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let (valid, length) = state.coordinator.validate();
    HttpResponse::Ok().json(ValidateResponse { valid, length })
}

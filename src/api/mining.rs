use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, error};

use super::models::{AppState, ForgedResponse, MessageResponse, SubmitRequest};

/// Submit a proof for the current tip. Forges a new block if the proof is valid.
#[post("/mine")]
pub async fn submit_proof(
    state: web::Data<AppState>,
    req: web::Json<SubmitRequest>,
) -> impl Responder {
    let SubmitRequest { proof, id } = req.into_inner();
    debug!("POST /mine - proof={proof:?} id={id:?}");

    match state.coordinator.submit(proof, id.as_deref()) {
        Ok(block) => HttpResponse::Ok().json(ForgedResponse::from_block(block)),
        Err(reason) if reason.is_client_error() => {
            HttpResponse::BadRequest().json(MessageResponse::new(reason.to_string()))
        }
        Err(reason) => {
            error!("POST /mine - ledger fault: {reason}");
            HttpResponse::InternalServerError().json(MessageResponse::new(reason.to_string()))
        }
    }
}

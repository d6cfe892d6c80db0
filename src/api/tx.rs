use actix_web::{HttpResponse, Responder, post, web};
use log::info;
use serde_json::Value;

use super::models::{AppState, QueuedTxResponse};

/// Queue an opaque transaction payload; it is absorbed by the next forged block.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> impl Responder {
    let index = state.coordinator.queue_transaction(body.into_inner());
    info!("POST /transactions/new - queued for block #{index}");
    HttpResponse::Created().json(QueuedTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::json;

    use crate::api::{self, AppState, ForgedResponse, QueuedTxResponse};
    use crate::blockchain::proof_of_work;

    const TEST_DIFFICULTY: usize = 2;

    #[actix_web::test]
    async fn queued_transaction_lands_in_next_block() {
        let state = web::Data::new(AppState::new(TEST_DIFFICULTY));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(api::init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({ "sender": "a", "recipient": "b", "amount": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let queued: QueuedTxResponse = test::read_body_json(resp).await;
        assert_eq!(queued.index, 1);

        let tip = state.coordinator.tip().unwrap();
        let proof = proof_of_work(&tip, TEST_DIFFICULTY);
        let req = test::TestRequest::post()
            .uri("/mine")
            .set_json(json!({ "proof": proof, "id": "W1" }))
            .to_request();
        let forged: ForgedResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(forged.index, 1);
        assert_eq!(forged.transactions.len(), 1);
        assert_eq!(forged.transactions[0]["recipient"], "b");
    }
}

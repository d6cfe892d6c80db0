use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        node_id: state.node_id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use crate::api::{self, AppState, HealthResponse};

    #[actix_web::test]
    async fn reports_node_identifier() {
        let state = web::Data::new(AppState::default());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(api::init_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.node_id, state.node_id);
        assert_eq!(body.node_id.len(), 32);
        assert!(!body.node_id.contains('-'));
    }
}

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use medicos_api::api::handlers::health_handler;
use medicos_api::api::routes::medico_routes;
use medicos_api::infrastructure::persistence::InMemoryMedicoRepository;
use medicos_api::state::AppState;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(InMemoryMedicoRepository::new()))
}

/// Registry routes plus `/health` over a fresh in-memory store.
pub fn make_server() -> TestServer {
    let app = medico_routes()
        .route("/health", axum::routing::get(health_handler))
        .with_state(create_test_state());
    TestServer::new(app).unwrap()
}

pub fn registration_body(nome: &str, crm: &str) -> Value {
    json!({
        "nome": nome,
        "email": format!("{crm}@x.com"),
        "crm": crm,
        "telefone": "11999990000",
        "especialidade": "CARDIOLOGIA",
        "endereco": {
            "logradouro": "Rua A",
            "bairro": "Centro",
            "cep": "12345678",
            "cidade": "SP",
            "uf": "SP",
            "numero": "100"
        }
    })
}

/// Registers a doctor and returns its id as seen in the listing.
pub async fn register(server: &TestServer, nome: &str, crm: &str) -> i64 {
    server
        .post("/medicos")
        .json(&registration_body(nome, crm))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let listing = server
        .get("/medicos")
        .add_query_param("size", 2000)
        .await
        .json::<Value>();

    listing["content"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["crm"] == crm)
        .and_then(|item| item["id"].as_i64())
        .unwrap()
}

pub async fn listed_crms(server: &TestServer) -> Vec<String> {
    let listing = server
        .get("/medicos")
        .add_query_param("size", 2000)
        .await
        .json::<Value>();

    listing["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["crm"].as_str().unwrap().to_string())
        .collect()
}

pub async fn count_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM medicos")
        .fetch_one(pool)
        .await
        .unwrap()
}

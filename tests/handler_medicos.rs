mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

// ─── REGISTER ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_register_then_list_example() {
    let server = common::make_server();

    let response = server
        .post("/medicos")
        .json(&json!({
            "nome": "Ana Silva",
            "email": "ana@x.com",
            "crm": "12345",
            "especialidade": "CARDIOLOGIA",
            "endereco": {
                "logradouro": "Rua A",
                "bairro": "Centro",
                "cep": "12345678",
                "cidade": "SP",
                "uf": "SP"
            }
        }))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    let listing = server.get("/medicos").await;
    listing.assert_status_ok();

    let json = listing.json::<Value>();
    let item = &json["content"][0];
    assert!(item["id"].is_i64());
    assert_eq!(item["nome"], "Ana Silva");
    assert_eq!(item["email"], "ana@x.com");
    assert_eq!(item["crm"], "12345");
    assert_eq!(item["especialidade"], "CARDIOLOGIA");
}

#[tokio::test]
async fn test_register_missing_required_fields() {
    let server = common::make_server();

    for field in ["nome", "email", "crm", "especialidade", "endereco"] {
        let mut body = common::registration_body("Ana", "100");
        body.as_object_mut().unwrap().remove(field);

        let response = server.post("/medicos").json(&body).await;
        response.assert_status_bad_request();

        let error = response.json::<Value>();
        assert_eq!(error["error"]["code"], "validation_error");
    }

    for field in ["logradouro", "bairro", "cep", "cidade", "uf"] {
        let mut body = common::registration_body("Ana", "100");
        body["endereco"].as_object_mut().unwrap().remove(field);

        server
            .post("/medicos")
            .json(&body)
            .await
            .assert_status_bad_request();
    }

    assert!(common::listed_crms(&server).await.is_empty());
}

#[tokio::test]
async fn test_register_blank_fields_rejected() {
    let server = common::make_server();

    let mut body = common::registration_body("Ana", "100");
    body["nome"] = json!("  ");
    let response = server.post("/medicos").json(&body).await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"]["details"]["nome"].is_array());

    let mut body = common::registration_body("Ana", "100");
    body["endereco"]["cidade"] = json!("");
    server
        .post("/medicos")
        .json(&body)
        .await
        .assert_status_bad_request();

    assert!(common::listed_crms(&server).await.is_empty());
}

#[tokio::test]
async fn test_register_invalid_cep_rejected() {
    let server = common::make_server();

    for cep in ["1234567", "123456789", "12345-678", "ABCDEFGH"] {
        let mut body = common::registration_body("Ana", "100");
        body["endereco"]["cep"] = json!(cep);

        server
            .post("/medicos")
            .json(&body)
            .await
            .assert_status_bad_request();
    }

    assert!(common::listed_crms(&server).await.is_empty());
}

#[tokio::test]
async fn test_register_unknown_especialidade_rejected() {
    let server = common::make_server();

    let mut body = common::registration_body("Ana", "100");
    body["especialidade"] = json!("PEDIATRIA");

    server
        .post("/medicos")
        .json(&body)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_register_malformed_json_rejected() {
    let server = common::make_server();

    let response = server
        .post("/medicos")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_register_duplicate_crm_conflicts() {
    let server = common::make_server();
    common::register(&server, "Ana", "555").await;

    let mut body = common::registration_body("Bruno", "555");
    body["email"] = json!("bruno@x.com");

    let response = server.post("/medicos").json(&body).await;
    response.assert_status(StatusCode::CONFLICT);

    let error = response.json::<Value>();
    assert_eq!(error["error"]["code"], "conflict");
    assert_eq!(error["error"]["details"]["field"], "crm");

    assert_eq!(common::listed_crms(&server).await, vec!["555"]);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let server = common::make_server();
    common::register(&server, "Ana", "555").await;

    let mut body = common::registration_body("Bruno", "556");
    body["email"] = json!("555@x.com");

    server
        .post("/medicos")
        .json(&body)
        .await
        .assert_status(StatusCode::CONFLICT);
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_defaults() {
    let server = common::make_server();

    for i in 0..12 {
        // Registered in reverse name order so sorting is observable.
        let nome = format!("Medico {:02}", 11 - i);
        common::register(&server, &nome, &format!("{}", 1000 + i)).await;
    }

    let response = server.get("/medicos").await;
    response.assert_status_ok();

    let json = response.json::<Value>();
    let content = json["content"].as_array().unwrap();

    assert_eq!(content.len(), 10);
    assert_eq!(json["number"], 0);
    assert_eq!(json["size"], 10);
    assert_eq!(json["totalElements"], 12);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["first"], true);
    assert_eq!(json["last"], false);

    let nomes: Vec<&str> = content
        .iter()
        .map(|item| item["nome"].as_str().unwrap())
        .collect();
    let mut sorted = nomes.clone();
    sorted.sort();
    assert_eq!(nomes, sorted);
    assert_eq!(nomes[0], "Medico 00");
}

#[tokio::test]
async fn test_list_items_hide_contact_data() {
    let server = common::make_server();
    common::register(&server, "Ana", "100").await;

    let json = server.get("/medicos").await.json::<Value>();
    let item = json["content"][0].as_object().unwrap();

    assert!(!item.contains_key("telefone"));
    assert!(!item.contains_key("endereco"));
    assert!(!item.contains_key("ativo"));
}

#[tokio::test]
async fn test_list_custom_page_size_and_sort() {
    let server = common::make_server();
    for (nome, crm) in [("Ana", "300"), ("Bruno", "100"), ("Carla", "200")] {
        common::register(&server, nome, crm).await;
    }

    let json = server
        .get("/medicos")
        .add_query_param("page", 1)
        .add_query_param("size", 2)
        .add_query_param("sort", "crm,desc")
        .await
        .json::<Value>();

    let content = json["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["crm"], "100");
    assert_eq!(json["number"], 1);
    assert_eq!(json["last"], true);
}

#[tokio::test]
async fn test_list_malformed_params_fall_back() {
    let server = common::make_server();
    common::register(&server, "Ana", "100").await;

    let response = server
        .get("/medicos")
        .add_query_param("page", "abc")
        .add_query_param("size", "-5")
        .add_query_param("sort", "nope")
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["number"], 0);
    assert_eq!(json["size"], 10);
    assert_eq!(json["content"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_huge_page_index_is_empty() {
    let server = common::make_server();
    common::register(&server, "Ana", "100").await;

    for page in ["99999999999", "4294967295"] {
        let response = server.get("/medicos").add_raw_query_param(&format!("page={page}")).await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["content"], json!([]));
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["last"], true);
    }
}

#[tokio::test]
async fn test_list_repeated_params_fall_back() {
    let server = common::make_server();
    for (nome, crm) in [("Bruno", "100"), ("Ana", "200")] {
        common::register(&server, nome, crm).await;
    }

    let response = server
        .get("/medicos")
        .add_raw_query_param("sort=crm&sort=crm,desc")
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["number"], 0);
    assert_eq!(json["size"], 10);
    assert_eq!(json["content"][0]["nome"], "Ana");
    assert_eq!(json["content"][1]["nome"], "Bruno");
}

#[tokio::test]
async fn test_list_empty() {
    let server = common::make_server();

    let json = server.get("/medicos").await.json::<Value>();

    assert_eq!(json["content"], json!([]));
    assert_eq!(json["totalElements"], 0);
    assert_eq!(json["empty"], true);
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_name_only() {
    let server = common::make_server();
    let id = common::register(&server, "Ana", "100").await;

    server
        .put("/medicos")
        .json(&json!({ "id": id, "nome": "Ana Souza" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let json = server.get("/medicos").await.json::<Value>();
    assert_eq!(json["content"][0]["nome"], "Ana Souza");
    assert_eq!(json["content"][0]["crm"], "100");
}

#[tokio::test]
async fn test_update_keeps_absent_fields() {
    let state = common::create_test_state();
    let app = medicos_api::api::routes::medico_routes().with_state(state.clone());
    let server = axum_test::TestServer::new(app).unwrap();
    let id = common::register(&server, "Ana", "100").await;

    server
        .put("/medicos")
        .json(&json!({ "id": id, "nome": "Ana Souza", "telefone": null }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let medico = state.medico_service.find(id).await.unwrap();
    assert_eq!(medico.nome, "Ana Souza");
    assert_eq!(medico.telefone.as_deref(), Some("11999990000"));
    assert_eq!(medico.endereco.logradouro, "Rua A");
    assert_eq!(medico.endereco.numero.as_deref(), Some("100"));
}

#[tokio::test]
async fn test_update_full_address_replaces_it() {
    let state = common::create_test_state();
    let app = medicos_api::api::routes::medico_routes().with_state(state.clone());
    let server = axum_test::TestServer::new(app).unwrap();
    let id = common::register(&server, "Ana", "100").await;

    server
        .put("/medicos")
        .json(&json!({
            "id": id,
            "endereco": {
                "logradouro": "Av. B",
                "bairro": "Jardins",
                "cep": "87654321",
                "cidade": "Rio",
                "uf": "RJ"
            }
        }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let medico = state.medico_service.find(id).await.unwrap();
    assert_eq!(medico.endereco.logradouro, "Av. B");
    assert_eq!(medico.endereco.cep, "87654321");
    assert!(medico.endereco.numero.is_none());
    assert_eq!(medico.nome, "Ana");
}

#[tokio::test]
async fn test_update_partial_address_rejected() {
    let state = common::create_test_state();
    let app = medicos_api::api::routes::medico_routes().with_state(state.clone());
    let server = axum_test::TestServer::new(app).unwrap();
    let id = common::register(&server, "Ana", "100").await;

    server
        .put("/medicos")
        .json(&json!({
            "id": id,
            "nome": "Ana Souza",
            "endereco": { "logradouro": "Av. B" }
        }))
        .await
        .assert_status_bad_request();

    let medico = state.medico_service.find(id).await.unwrap();
    assert_eq!(medico.nome, "Ana");
    assert_eq!(medico.endereco.logradouro, "Rua A");
}

#[tokio::test]
async fn test_update_missing_id_rejected() {
    let server = common::make_server();

    server
        .put("/medicos")
        .json(&json!({ "nome": "Ana" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_update_not_found() {
    let server = common::make_server();
    common::register(&server, "Ana", "100").await;

    let response = server
        .put("/medicos")
        .json(&json!({ "id": 9999, "nome": "Ghost" }))
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");

    let json = server.get("/medicos").await.json::<Value>();
    assert_eq!(json["content"][0]["nome"], "Ana");
}

// ─── DEACTIVATE ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_deactivate_hides_from_listing() {
    let server = common::make_server();
    let id = common::register(&server, "Ana", "100").await;
    common::register(&server, "Bruno", "200").await;

    server
        .delete(&format!("/medicos/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(common::listed_crms(&server).await, vec!["200"]);

    for sort in ["id", "nome,desc", "crm"] {
        let json = server
            .get("/medicos")
            .add_query_param("sort", sort)
            .await
            .json::<Value>();
        assert!(
            json["content"]
                .as_array()
                .unwrap()
                .iter()
                .all(|item| item["crm"] != "100")
        );
        assert_eq!(json["totalElements"], 1);
    }
}

#[tokio::test]
async fn test_deactivate_twice_is_idempotent() {
    let server = common::make_server();
    let id = common::register(&server, "Ana", "100").await;

    server
        .delete(&format!("/medicos/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&format!("/medicos/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_deactivated_medico_keeps_crm_reserved() {
    let server = common::make_server();
    let id = common::register(&server, "Ana", "100").await;

    server.delete(&format!("/medicos/{id}")).await;

    let mut body = common::registration_body("Outra", "100");
    body["email"] = json!("outra@x.com");
    server
        .post("/medicos")
        .json(&body)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_deactivate_not_found() {
    let server = common::make_server();

    server.delete("/medicos/424242").await.assert_status_not_found();
}

#[tokio::test]
async fn test_deactivate_non_integer_id() {
    let server = common::make_server();

    server.delete("/medicos/abc").await.assert_status_bad_request();
}

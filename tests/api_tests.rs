use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use revisoes_quadriciclos::config::database::DatabaseConfig;
use revisoes_quadriciclos::config::environment::EnvironmentConfig;
use revisoes_quadriciclos::database::DatabaseConnection;
use revisoes_quadriciclos::models::{NewQuadricycle, Quadricycle};
use revisoes_quadriciclos::routes::create_app_router;
use revisoes_quadriciclos::services::build_quadricycle;
use revisoes_quadriciclos::state::AppState;

// Función helper para crear la app de test sobre una base temporal
async fn create_test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("test.sqlite").display());
    let db = DatabaseConnection::connect(&DatabaseConfig::from_url(url))
        .await
        .unwrap();

    let config = EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        database_url: String::new(),
        cors_origins: Vec::new(),
    };
    (create_app_router(AppState::new(db.pool().clone(), config)), dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn new_quad(client: &str, purchase_date: &str) -> Quadricycle {
    build_quadricycle(NewQuadricycle {
        model: "Honda TRX 420".to_string(),
        purchase_date: purchase_date.to_string(),
        client_name: client.to_string(),
        whatsapp: "(11) 98765-4321".to_string(),
    })
    .unwrap()
}

async fn post_quad(app: &Router, quad: &Quadricycle) -> StatusCode {
    let (status, _) = send(app, Method::POST, "/api/quadricycles", Some(json!(quad))).await;
    status
}

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_head_probe_on_collection() {
    let (app, _dir) = create_test_app().await;
    let (status, _) = send(&app, Method::HEAD, "/api/quadricycles", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_list_newest_first() {
    let (app, _dir) = create_test_app().await;
    let first = new_quad("Ana", "2024-01-01");
    let second = new_quad("Bia", "2023-06-15");

    assert_eq!(post_quad(&app, &first).await, StatusCode::CREATED);
    assert_eq!(post_quad(&app, &second).await, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/api/quadricycles", None).await;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<Quadricycle> = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(listed, vec![second, first]);

    let review = &body[1]["reviews"][0];
    assert_eq!(review["label"], "1ª Revisão");
    assert_eq!(review["scheduledDate"], "2024-03-31");
    assert_eq!(review["daysFromPrevious"], 90);
    assert_eq!(review["isCompleted"], false);
    assert_eq!(body[1]["reviews"][2]["scheduledDate"], "2025-03-26");
}

#[tokio::test]
async fn test_create_rejects_duplicate_id_and_bad_reviews() {
    let (app, _dir) = create_test_app().await;
    let quad = new_quad("Ana", "2024-01-01");
    assert_eq!(post_quad(&app, &quad).await, StatusCode::CREATED);
    assert_eq!(post_quad(&app, &quad).await, StatusCode::CONFLICT);

    let mut two_reviews = new_quad("Bia", "2024-01-01");
    two_reviews.reviews.pop();
    assert_eq!(post_quad(&app, &two_reviews).await, StatusCode::BAD_REQUEST);

    let mut contradictory = new_quad("Caio", "2024-01-01");
    contradictory.reviews[0].is_completed = true;
    contradictory.reviews[0].is_refused = true;
    assert_eq!(post_quad(&app, &contradictory).await, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/quadricycles", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_status() {
    let (app, _dir) = create_test_app().await;
    let quad = new_quad("Ana", "2024-01-01");
    post_quad(&app, &quad).await;

    let uri = format!("/api/quadricycles/{}", quad.id);
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (_, listed) = send(&app, Method::GET, "/api/quadricycles", None).await;
    assert_eq!(listed[0]["status"], "completed");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/quadricycles/unknown",
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_review_partial_update_and_clear() {
    let (app, _dir) = create_test_app().await;
    let quad = new_quad("Ana", "2024-01-01");
    post_quad(&app, &quad).await;
    let uri = format!("/api/quadricycles/{}/reviews/2", quad.id);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "isCompleted": true, "responsible": "Marcos", "km": "2.500" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Solo cambia lo enviado
    send(&app, Method::PUT, &uri, Some(json!({ "observation": "Troca de óleo" }))).await;

    let (_, body) = send(&app, Method::GET, "/api/quadricycles", None).await;
    let review = &body[0]["reviews"][1];
    assert_eq!(review["isCompleted"], true);
    assert_eq!(review["isRefused"], false);
    assert_eq!(review["responsible"], "Marcos");
    assert_eq!(review["km"], "2.500");
    assert_eq!(review["observation"], "Troca de óleo");
    assert_eq!(review["scheduledDate"], "2024-09-27");

    // Recusar desmarca la realización
    send(&app, Method::PUT, &uri, Some(json!({ "isRefused": true, "refusalReason": "Sem tempo" }))).await;
    let (_, body) = send(&app, Method::GET, "/api/quadricycles", None).await;
    assert_eq!(body[0]["reviews"][1]["isCompleted"], false);
    assert_eq!(body[0]["reviews"][1]["isRefused"], true);

    let clear = json!({
        "isCompleted": false,
        "isRefused": false,
        "observation": null,
        "refusalReason": null,
        "responsible": null,
        "km": null
    });
    send(&app, Method::PUT, &uri, Some(clear)).await;
    let (_, body) = send(&app, Method::GET, "/api/quadricycles", None).await;
    let listed: Vec<Quadricycle> = serde_json::from_value(body).unwrap();
    assert_eq!(listed[0].reviews[1], quad.reviews[1]);
}

#[tokio::test]
async fn test_review_update_errors() {
    let (app, _dir) = create_test_app().await;
    let quad = new_quad("Ana", "2024-01-01");
    post_quad(&app, &quad).await;

    let uri = format!("/api/quadricycles/{}/reviews/1", quad.id);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "isCompleted": true, "isRefused": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let missing = format!("/api/quadricycles/{}/reviews/4", quad.id);
    let (status, _) = send(&app, Method::PUT, &missing, Some(json!({ "isCompleted": true }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/quadricycles/unknown/reviews/1",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_cascades_reviews() {
    let (app, _dir) = create_test_app().await;
    let quad = new_quad("Ana", "2024-01-01");
    post_quad(&app, &quad).await;

    let uri = format!("/api/quadricycles/{}", quad.id);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/quadricycles", None).await;
    assert_eq!(body, json!([]));

    // El mismo id puede volver a registrarse: no quedan reviews huérfanas
    assert_eq!(post_quad(&app, &quad).await, StatusCode::CREATED);

    let (status, _) = send(&app, Method::DELETE, "/api/quadricycles/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

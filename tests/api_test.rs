#![cfg(feature = "server")]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use dbpedia_explorer::{
    api::{self, AppState},
    providers::InMemoryResolver,
    EntityRecord, Explorer, Settings,
};

fn app() -> Router {
    let resolver: InMemoryResolver = vec![
        EntityRecord::new("Paris")
            .with_comment("Paris is the capital of France, near Versailles")
            .with_see_also([
                "http://dbpedia.org/resource/Versailles",
                "http://dbpedia.org/resource/Lyon",
            ]),
        EntityRecord::new("Versailles").with_comment("City west of Paris"),
    ]
    .into_iter()
    .collect();

    let settings = Settings::default();
    let state = AppState::new(Explorer::new(Arc::new(resolver)), &settings);
    api::router(state, &settings.allowed_origins)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root() {
    let (status, body) = send(get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the DBpedia Visual Explorer API");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["resolver"], "memory");
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn test_get_entity() {
    let (status, body) = send(get("/api/entity/Paris")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "Paris");
    assert_eq!(body["data"]["seeAlso"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["thumbnail"], Value::Null);
}

#[tokio::test]
async fn test_get_unknown_entity() {
    let (status, body) = send(get("/api/entity/Berlin")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("Berlin"));
}

#[tokio::test]
async fn test_fetch_related_entities() {
    let (_, main) = send(get("/api/entity/Paris")).await;
    let (status, body) = send(post_json("/api/fetch-related-entities", main)).await;

    assert_eq!(status, StatusCode::OK);

    let entities = body["entities"].as_array().unwrap();
    let names: Vec<&str> = entities.iter().map(|e| e["query"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Paris", "Versailles", "Lyon"]);

    assert_eq!(entities[0]["relevance"], 1.0);
    assert_eq!(entities[2]["relevance"], 0.0);
    assert_eq!(entities[2]["card_size"], 50.0);
    assert_eq!(entities[2]["distance"], 100.0);
}

#[tokio::test]
async fn test_fetch_related_rejects_blank_identifier() {
    let body = json!({ "query": "  ", "data": { "seeAlso": [], "comment": null, "thumbnail": null } });
    let (status, body) = send(post_json("/api/fetch-related-entities", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/fetch-related-entities")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
}

use super::*;
use actix_web::{test, App};
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use crate::store::QuestionStore;

fn app_state(static_dir: PathBuf) -> web::Data<AppState> {
    let store = QuestionStore::from_categories(vec![
        (
            "robots",
            vec![
                QuestionPair::new("A motor with feedback control", "What is a servo?"),
                QuestionPair::new("Open loop motor", "Stepper"),
                QuestionPair::new("Rotation sensor", "Encoder"),
            ],
        ),
        ("sensors", vec![QuestionPair::new("Measures distance", "LIDAR")]),
    ]);
    web::Data::new(AppState {
        queries: QueryService::new(Arc::new(store)),
        static_dir,
    })
}

fn no_static_dir() -> PathBuf {
    PathBuf::from("does-not-exist")
}

#[actix_web::test]
async fn lists_categories() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::get().uri("/api/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, json!({ "categories": ["robots", "sensors"] }));
}

#[actix_web::test]
async fn pages_through_questions() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::get()
        .uri("/api/questions?category=robots&limit=1&offset=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(
        body,
        json!({ "items": [{ "question": "Open loop motor", "answer": "Stepper" }] })
    );
}

#[actix_web::test]
async fn zero_limit_returns_whole_deck() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::get()
        .uri("/api/questions?category=robots&mode=test&limit=0")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn unknown_category_is_404() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::get()
        .uri("/api/questions?category=cooking")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "detail": "Category not found" }));
}

#[actix_web::test]
async fn missing_category_parameter_is_rejected() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::get().uri("/api/questions").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn checks_answers() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::post()
        .uri("/api/check")
        .set_json(json!({
            "category": "robots",
            "question": "Open loop motor",
            "answer": "  stepper ",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, json!({ "correct": true, "expected": "Stepper" }));

    let request = test::TestRequest::post()
        .uri("/api/check")
        .set_json(json!({
            "category": "robots",
            "question": "Rotation sensor",
            "answer": "Potentiometer",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, json!({ "correct": false, "expected": "Encoder" }));
}

#[actix_web::test]
async fn unknown_question_is_404() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::post()
        .uri("/api/check")
        .set_json(json!({
            "category": "robots",
            "question": "What is a gear?",
            "answer": "Wheel",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "detail": "Question not found in category" }));
}

#[actix_web::test]
async fn index_falls_back_to_banner() {
    let state = app_state(no_static_dir());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, json!({ "message": "Robotics Test Portal API" }));
}

#[actix_web::test]
async fn serves_front_end_assets() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>Portal</h1>").unwrap();
    fs::write(dir.path().join("main.js"), "loadCategories();").unwrap();
    let state = app_state(dir.path().to_owned());
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;

    let request = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, request).await;
    assert_eq!(&body[..], b"<h1>Portal</h1>");

    let request = test::TestRequest::get().uri("/static/main.js").to_request();
    let body = test::call_and_read_body(&app, request).await;
    assert_eq!(&body[..], b"loadCategories();");
}

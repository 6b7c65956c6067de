//! Integration tests for the error-normalizing middleware.
//!
//! Every failure leaving the route tree must surface as the stable
//! envelope: statusCode, message, error, path, and optional info, with
//! server-side failures sanitized.

use actix_web::{test, web, App, HttpResponse};
use serde::Deserialize;
use serde_json::Value;

use account_api::handlers::error::RaisedError;
use account_api::middleware::ErrorNormalizer;
use account_core::errors::{DomainError, InfrastructureError, UseCaseError};

async fn ok_handler() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"ok": true}))
}

async fn missing_user() -> Result<HttpResponse, RaisedError> {
    Err(RaisedError(
        DomainError::not_found("User not found").with_info(serde_json::json!({"userId": 123})),
    ))
}

async fn broken_database() -> Result<HttpResponse, RaisedError> {
    Err(RaisedError(
        InfrastructureError::internal_server_error("connection refused to db-primary:5432")
            .with_info(serde_json::json!({"code": "08006"})),
    ))
}

async fn forbidden() -> Result<HttpResponse, RaisedError> {
    Err(RaisedError(UseCaseError::forbidden("account is suspended")))
}

#[derive(Debug, Deserialize)]
struct EchoBody {
    #[allow(dead_code)]
    value: i64,
}

async fn echo(_body: web::Json<EchoBody>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(ErrorNormalizer)
        .route("/ok", web::get().to(ok_handler))
        .route("/missing", web::get().to(missing_user))
        .route("/broken", web::get().to(broken_database))
        .route("/forbidden", web::get().to(forbidden))
        .route("/echo", web::post().to(echo))
}

#[actix_rt::test]
async fn successful_responses_pass_through_untouched() {
    let app = test::init_service(test_app()).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/ok").to_request()).await;
    assert_eq!(response.status(), 200);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["ok"], true);
}

#[actix_rt::test]
async fn client_faults_keep_message_kind_and_info() {
    let app = test::init_service(test_app()).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
    assert_eq!(response.status(), 404);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "User not found");
    assert_eq!(body["error"], "DomainError");
    assert_eq!(body["path"], "/missing");
    assert_eq!(body["info"]["userId"], 123);
}

#[actix_rt::test]
async fn server_faults_are_sanitized() {
    let app = test::init_service(test_app()).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/broken").to_request()).await;
    assert_eq!(response.status(), 500);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["statusCode"], 500);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["error"], "InternalServerError");
    assert_eq!(body["path"], "/broken");
    assert!(body.get("info").is_none());
}

#[actix_rt::test]
async fn taxonomy_status_codes_survive_normalization() {
    let app = test::init_service(test_app()).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/forbidden").to_request()).await;
    assert_eq!(response.status(), 403);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "account is suspended");
    assert_eq!(body["error"], "UseCaseError");
}

#[actix_rt::test]
async fn malformed_json_body_becomes_a_400_envelope() {
    let app = test::init_service(test_app()).await;

    let request = test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["error"], "JsonPayloadError");
    assert_eq!(body["path"], "/echo");
}

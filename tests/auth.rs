mod common;

use common::{file_part, TestApp};
use products_api::{
    modules::auth::service::auth::{issue_access_token, Subject},
    types::{AppEnvironment, AuthContext},
};
use reqwest::{multipart::Form, Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn health_check_responds() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn dev_sign_in_issues_usable_tokens() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_json(
            "/api/dev/auth/sign-in",
            json!({ "id": "shop-admin", "is_admin": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_owned();

    let form = Form::new()
        .text("name", "Kettle")
        .text("description", "Electric kettle")
        .text("price", "30")
        .part("file", file_part("kettle.webp", b"kettle"));
    let (status, _) = app
        .send_form(Method::POST, "/api/products", form, Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn dev_sign_in_defaults_to_regular_users() {
    let app = TestApp::spawn().await;

    let (_, body) = app
        .post_json("/api/dev/auth/sign-in", json!({ "id": "shopper" }))
        .await;
    let token = body["access_token"].as_str().unwrap().to_owned();

    let (status, body) = app.delete("/api/products/anything", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn dev_sign_in_validates_the_user_id() {
    let app = TestApp::spawn().await;

    for id in ["", "a|b", " padded "] {
        let (status, body) = app
            .post_json("/api/dev/auth/sign-in", json!({ "id": id }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["id"].is_array());
    }
}

#[tokio::test]
async fn dev_routes_are_hidden_in_production() {
    let app = TestApp::spawn_with(AppEnvironment::Production).await;

    let (status, _) = app
        .post_json(
            "/api/dev/auth/sign-in",
            json!({ "id": "shop-admin", "is_admin": true }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn expired_tokens_are_rejected() {
    let app = TestApp::spawn().await;
    app.token_for("admin", true).await;

    let expired = AuthContext {
        access_token_ttl: chrono::Duration::hours(-2),
        ..app.ctx.auth.clone()
    };
    let token = issue_access_token(&expired, Subject::new("admin", None)).unwrap();

    let (status, body) = app.delete("/api/products/anything", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use service::authz::Role;

use common::TestApp;

#[tokio::test]
async fn admin_creates_user_who_can_log_in() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.token(&[Role::Admin]);

    let reply = app
        .post("/api/users", &admin, json!({"username": "mike", "password": "s3cret", "roles": ["ROLE_OWNER_ADMIN"]}))
        .await?;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["username"], "mike");
    assert_eq!(reply.body["roles"], json!(["OWNER_ADMIN"]));
    assert!(reply.body.get("password").is_none());

    let login = app
        .send(Method::POST, "/auth/login", None, Some(json!({"username": "mike", "password": "s3cret"})))
        .await?;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().unwrap().to_string();

    assert_eq!(app.get("/api/owners", &token).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/vets", &token).await?.status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_conflicts() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.token(&[Role::Admin]);
    let user = json!({"username": "mike", "password": "s3cret", "roles": ["VET_ADMIN"]});
    assert_eq!(app.post("/api/users", &admin, user.clone()).await?.status, StatusCode::CREATED);
    assert_eq!(app.post("/api/users", &admin, user).await?.status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn user_payload_is_validated_without_echoing_password() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.token(&[Role::Admin]);
    let reply = app.post("/api/users", &admin, json!({"username": "mike", "password": "s3cret", "roles": []})).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.errors()["roles"], "must not be empty");
    assert!(reply.body.get("password").is_none());

    let owner_admin = app.token(&[Role::OwnerAdmin]);
    let reply = app.post("/api/users", &owner_admin, json!({"username": "x"})).await?;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn bad_credentials_and_tokens_are_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let admin = app.token(&[Role::Admin]);
    app.post("/api/users", &admin, json!({"username": "mike", "password": "s3cret", "roles": ["ADMIN"]})).await?;

    let login = app
        .send(Method::POST, "/auth/login", None, Some(json!({"username": "mike", "password": "wrong"})))
        .await?;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let reply = app.get("/api/pettypes", "not-a-jwt").await?;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    Ok(())
}

#[tokio::test]
async fn unsecured_mode_grants_every_role() -> anyhow::Result<()> {
    let app = TestApp::with_security(false).await?;
    let reply = app.send(Method::POST, "/api/pettypes", None, Some(json!({"name": "cat"}))).await?;
    assert_eq!(reply.status, StatusCode::CREATED);
    let reply = app.send(Method::GET, "/api/owners", None, None).await?;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn public_endpoints() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let health = app.send(Method::GET, "/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, json!({"status": "ok"}));

    let root = app.send(Method::GET, "/", None, None).await?;
    assert_eq!(root.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(root.location(), Some("/swagger-ui/"));

    let doc = app.send(Method::GET, "/api-docs/openapi.json", None, None).await?;
    assert_eq!(doc.status, StatusCode::OK);
    assert!(doc.body["paths"].get("/api/owners/{ownerId}/pets").is_some());
    Ok(())
}

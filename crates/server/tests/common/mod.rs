#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use configs::AppConfig;
use service::auth::{repo::SeaOrmAuthRepository, AuthConfig, AuthService};
use service::authz::Role;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    auth: AuthService<SeaOrmAuthRepository>,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `Value::Null` for an empty body.
    pub body: Value,
}

impl Reply {
    pub fn errors(&self) -> Value {
        self.headers
            .get("errors")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or(Value::Null)
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_security(true).await
    }

    pub async fn with_security(enabled: bool) -> anyhow::Result<Self> {
        let db = models::db::connect_sqlite_memory().await?;
        models::db::migrate(&db).await?;

        let mut cfg = AppConfig::default();
        cfg.security.enabled = enabled;
        cfg.security.jwt_secret = SECRET.into();
        let router = server::build_app(&cfg, db.clone());

        let auth = AuthService::new(
            Arc::new(SeaOrmAuthRepository::new(db.clone())),
            AuthConfig { jwt_secret: SECRET.into(), token_ttl_minutes: 60 },
        );
        Ok(Self { router, db, auth })
    }

    pub fn token(&self, roles: &[Role]) -> String {
        let roles: BTreeSet<Role> = roles.iter().copied().collect();
        self.auth.issue_token("tester", &roles).expect("issue token")
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<Reply> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => req.body(Body::empty())?,
        };
        self.dispatch(req).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, token: &str, raw: &'static str) -> anyhow::Result<Reply> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))?;
        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> anyhow::Result<Reply> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok(Reply { status, headers, body })
    }

    pub async fn get(&self, uri: &str, token: &str) -> anyhow::Result<Reply> {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> anyhow::Result<Reply> {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> anyhow::Result<Reply> {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> anyhow::Result<Reply> {
        self.send(Method::DELETE, uri, Some(token), None).await
    }
}

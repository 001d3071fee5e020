//! Shared harness: a real router over a throwaway SQLite file.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::NamedTempFile;
use todo_backend::{
    auth::{
        bootstrap::ensure_default_admin, password::MIN_COST, Authenticator, CredentialHasher,
        SigningKey, TokenService,
    },
    build_router, db, AppState,
};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _db: NamedTempFile,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.text))
    }
}

impl TestApp {
    pub fn new() -> Self {
        let db_file = NamedTempFile::new().unwrap();
        let db_path = db_file.path().to_str().unwrap().to_string();
        db::migrate(&db_path).unwrap();

        let authenticator = Arc::new(Authenticator::new(TokenService::new(
            &SigningKey::from_secret(TEST_SECRET),
        )));
        let hasher = CredentialHasher::new(MIN_COST);
        let state = AppState::new(&db_path, authenticator, hasher);

        Self {
            router: build_router(state.clone()),
            state,
            _db: db_file,
        }
    }

    /// App with the default admin already bootstrapped
    pub fn with_admin() -> Self {
        let app = Self::new();
        ensure_default_admin(app.state.users.as_ref(), &app.state.hasher).unwrap();
        app
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            text: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/register",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register then log in, returning the session token
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let registered = self.register(email, password).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.text);

        let login = self.login(email, password).await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.text);
        login.json()["token"].as_str().unwrap().to_string()
    }
}

//! Shared helpers for API integration tests

#![allow(dead_code)]

use std::io::Cursor;

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use recipe_server::api::build_app;
use recipe_server::core::{AppState, Config};
use recipe_server::db::DbService;
use recipe_server::db::repository::{ingredient, tag};
use shared::models::{IngredientCreate, TagCreate};

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    /// Keeps the media directory alive for the test
    pub media_dir: TempDir,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl Response {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let media_dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(media_dir.path());
        let db = DbService::new(&config.database_path).await.unwrap();
        let state = AppState::with_pool(config, db.pool).await.unwrap();
        let app = build_app(state.clone());
        Self {
            app,
            state,
            media_dir,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        Response {
            status,
            headers,
            bytes: bytes.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Register a user and return `(id, token)`
    pub async fn register(&self, username: &str) -> (i64, String) {
        let email = format!("{username}@example.com");
        let created = self
            .post(
                "/api/users",
                None,
                json!({
                    "email": email,
                    "username": username,
                    "first_name": "Test",
                    "last_name": "User",
                    "password": "password123",
                }),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.text());
        let id = created.json()["id"].as_i64().unwrap();

        let login = self
            .post(
                "/api/auth/token/login",
                None,
                json!({"email": email, "password": "password123"}),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.text());
        let token = login.json()["auth_token"].as_str().unwrap().to_string();
        (id, token)
    }

    pub async fn tag(&self, name: &str, slug: &str) -> i64 {
        tag::create(
            &self.state.pool,
            TagCreate {
                name: name.into(),
                slug: slug.into(),
                color: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    pub async fn ingredient(&self, name: &str, unit: &str) -> i64 {
        ingredient::create(
            &self.state.pool,
            IngredientCreate {
                name: name.into(),
                measurement_unit: unit.into(),
            },
        )
        .await
        .unwrap()
        .id
    }

    /// Create a recipe through the API and return its id
    pub async fn recipe(
        &self,
        token: &str,
        name: &str,
        tags: &[i64],
        ingredients: &[(i64, i64)],
    ) -> i64 {
        let response = self
            .post("/api/recipes", Some(token), recipe_body(name, tags, ingredients))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["id"].as_i64().unwrap()
    }
}

pub fn png_data_url() -> String {
    let img = image::RgbImage::new(2, 2);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

pub fn recipe_body(name: &str, tags: &[i64], ingredients: &[(i64, i64)]) -> Value {
    json!({
        "name": name,
        "text": "Cook it well",
        "image": png_data_url(),
        "cooking_time": 15,
        "tags": tags,
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({"id": id, "amount": amount}))
            .collect::<Vec<_>>(),
    })
}

/// Ids of the `results` array of a page
pub fn result_ids(page: &Value) -> Vec<i64> {
    page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

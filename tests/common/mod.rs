#![allow(dead_code)]

use bigdecimal::BigDecimal;
use chrono::Duration;
use products_api::{
    app,
    modules::{
        auth::service::auth::{issue_access_token, Subject},
        product::repository::{
            CreateProductPayload, InMemoryProductRepository, Product, ProductRepository,
        },
        storage::UploadedMedia,
        user::repository::{InMemoryUserRepository, UpsertUserPayload, UserRepository},
    },
    types::{AppContext, AppEnvironment, AuthContext, Context, StorageContext},
};
use reqwest::{multipart::Form, Method, StatusCode};
use serde_json::Value;
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;

/// The production router served on an ephemeral port, backed by in-memory
/// repositories and a throwaway uploads directory.
pub struct TestApp {
    pub ctx: Arc<Context>,
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
    _uploads: TempDir,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(AppEnvironment::Development).await
    }

    pub async fn spawn_with(environment: AppEnvironment) -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let ctx = Arc::new(Context {
            app: AppContext {
                host: addr.ip().to_string(),
                environment,
                port: addr.port(),
                url: base_url.clone(),
            },
            auth: AuthContext {
                jwt_secret: String::from("integration-secret"),
                access_token_ttl: Duration::hours(1),
            },
            storage: StorageContext {
                uploads_dir: uploads.path().canonicalize().unwrap(),
            },
            products: Arc::new(InMemoryProductRepository::default()),
            users: Arc::new(InMemoryUserRepository::default()),
        });

        let router = app::router(ctx.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            ctx,
            base_url,
            client: reqwest::Client::new(),
            handle,
            _uploads: uploads,
        }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.ctx.storage.uploads_dir.clone()
    }

    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.uploads_dir()).unwrap().count()
    }

    pub async fn token_for(&self, id: &str, is_admin: bool) -> String {
        self.ctx
            .users
            .upsert(UpsertUserPayload {
                id: String::from(id),
                is_admin,
            })
            .await
            .unwrap();

        issue_access_token(&self.ctx.auth, Subject::new(id, Some(String::from("tests")))).unwrap()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin", true).await
    }

    pub async fn customer_token(&self) -> String {
        self.token_for("customer", false).await
    }

    /// Inserts a product straight into the repository, backed by a real file
    /// in the uploads directory.
    pub async fn seed(&self, name: &str, description: &str, price: i64) -> Product {
        let file_name = format!("{}.png", ulid::Ulid::new());
        let path = self.uploads_dir().join(&file_name);
        std::fs::write(&path, b"seeded").unwrap();

        self.ctx
            .products
            .create(CreateProductPayload {
                name: String::from(name),
                description: String::from(description),
                price: BigDecimal::from(price),
                image: UploadedMedia {
                    file_name,
                    original_name: Some(String::from("seed.png")),
                    path: path.to_string_lossy().into_owned(),
                },
            })
            .await
            .unwrap()
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        send(self.request(Method::GET, path, None)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        send(self.request(Method::DELETE, path, token)).await
    }

    pub async fn send_form(
        &self,
        method: Method,
        path: &str,
        form: Form,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        send(self.request(method, path, token).multipart(form)).await
    }

    pub async fn post_json(&self, path: &str, payload: Value) -> (StatusCode, Value) {
        send(self.request(Method::POST, path, None).json(&payload)).await
    }
}

async fn send(request: reqwest::RequestBuilder) -> (StatusCode, Value) {
    let response = request.send().await.unwrap();
    let status = response.status();
    let bytes = response.bytes().await.unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, body)
}

pub fn file_part(file_name: &str, contents: &[u8]) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(contents.to_vec()).file_name(String::from(file_name))
}

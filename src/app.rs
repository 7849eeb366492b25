use crate::{
    modules,
    types::{self, Config, Context, ToContext},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors, trace};

pub const BODY_LIMIT: usize = 1024 * 1024 * 10;

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Builds the full HTTP surface around an already constructed context.
pub fn router(ctx: Arc<Context>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", modules::get_router(&ctx.app.environment))
        .with_state(ctx.clone())
        .layer(Extension(ctx))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(trace::TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_methods([
                    Method::OPTIONS,
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_origin(cors::Any),
        )
}

impl App {
    pub async fn new(config: Config) -> Result<Self, types::Error> {
        let ctx: Arc<Context> = Arc::new(config.to_context().await?);
        let router = router(ctx.clone());

        Ok(Self { ctx, router })
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await?;

        tracing::info!("App is running on {} ({})", address, self.ctx.app.url);

        axum::serve(listener, self.router).await
    }
}

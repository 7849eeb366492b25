use super::{dev, product};
use crate::types::{AppEnvironment, Context};
use axum::Router;
use std::sync::Arc;

pub fn get_router(environment: &AppEnvironment) -> Router<Arc<Context>> {
    let router = Router::new().nest("/products", product::routes::get_router());

    match environment {
        AppEnvironment::Development => router.nest("/dev", dev::routes::get_router()),
        AppEnvironment::Production => router,
    }
}

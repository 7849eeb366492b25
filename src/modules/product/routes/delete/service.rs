use super::types::{request, response};
use crate::{modules::storage, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let product = ctx
        .products
        .delete_by_id(&payload.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteProduct)?
        .ok_or(response::Error::ProductNotFound)?;

    tracing::info!("Product {} deleted by {}", product.id, payload.auth.user.id);

    if storage::delete_file(&ctx.storage, &product.image).await.is_err() {
        tracing::warn!("Failed to remove image {} of deleted product", product.image);
    }

    Ok(response::Success::ProductDeleted)
}

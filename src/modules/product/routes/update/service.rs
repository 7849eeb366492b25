use super::types::{request, response};
use crate::{
    modules::{
        product::{price, repository::UpdateProductPayload},
        storage,
    },
    types::{Context, StorageContext},
};
use std::sync::Arc;
use validator::Validate;

async fn discard_upload(storage: &StorageContext, path: &str) {
    if storage::delete_file(storage, path).await.is_err() {
        tracing::warn!("Failed to clean up upload {}", path);
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let body = payload.body;

    body.validate().map_err(response::Error::InvalidPayload)?;

    let price = body
        .price
        .as_deref()
        .map(|raw| price::parse_amount(raw).ok_or(response::Error::InvalidPrice))
        .transpose()?;

    let product = ctx
        .products
        .find_by_id(&payload.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateProduct)?
        .ok_or(response::Error::ProductNotFound)?;

    let image = match body.file {
        Some(file) => Some(
            storage::upload_file(&ctx.storage, file)
                .await
                .map_err(|_| response::Error::FailedToUpdateProduct)?,
        ),
        None => None,
    };
    let new_image_path = image.as_ref().map(|image| image.path.clone());

    let result = ctx
        .products
        .update_by_id(
            &payload.id,
            UpdateProductPayload {
                name: body.name,
                description: body.description,
                price,
                image,
            },
        )
        .await;

    let outcome = match result {
        Ok(Some(_)) => Ok(response::Success::ProductUpdated),
        Ok(None) => Err(response::Error::ProductNotFound),
        Err(_) => Err(response::Error::FailedToUpdateProduct),
    };

    // Only one image is kept: the new upload on success, the original otherwise.
    match (&outcome, new_image_path) {
        (Ok(_), Some(_)) => discard_upload(&ctx.storage, &product.image).await,
        (Err(_), Some(path)) => discard_upload(&ctx.storage, &path).await,
        (_, None) => {}
    }

    if outcome.is_ok() {
        tracing::info!("Product {} updated by {}", payload.id, payload.auth.user.id);
    }

    outcome
}

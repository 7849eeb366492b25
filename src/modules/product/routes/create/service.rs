use super::types::{request, response};
use crate::{
    modules::{
        product::{price, repository::CreateProductPayload},
        storage,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let body = payload.body;

    body.validate().map_err(response::Error::InvalidPayload)?;

    let (Some(name), Some(description), Some(raw_price)) =
        (body.name, body.description, body.price)
    else {
        return Err(response::Error::MissingFields);
    };
    let file = body.file.ok_or(response::Error::NoFileUploaded)?;
    let price = price::parse_amount(&raw_price).ok_or(response::Error::InvalidPrice)?;

    let image = storage::upload_file(&ctx.storage, file)
        .await
        .map_err(|_| response::Error::FailedToSaveProduct)?;
    let image_path = image.path.clone();

    match ctx
        .products
        .create(CreateProductPayload {
            name,
            description,
            price,
            image,
        })
        .await
    {
        Ok(product) => {
            tracing::info!("Product {} created by {}", product.id, payload.auth.user.id);
            Ok(response::Success::ProductCreated(product))
        }
        Err(_) => {
            if storage::delete_file(&ctx.storage, &image_path).await.is_err() {
                tracing::warn!("Failed to clean up orphaned upload {}", image_path);
            }
            Err(response::Error::FailedToSaveProduct)
        }
    }
}

use super::types::{request, response};
use crate::{modules::product::repository::Filters, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    ctx.products
        .find_many(payload.pagination, &Filters::default())
        .await
        .map_err(|_| response::Error::FailedToFetchProducts)
        .map(response::Success::Products)
}

use super::types::{request, response};
use crate::{
    modules::product::repository::Filters, types::Context, utils::pagination::Paginated,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let filters = Filters::from(payload.filters);

    let products = ctx
        .products
        .find_many(payload.pagination, &filters)
        .await
        .map_err(|_| response::Error::FailedToFetchProducts)?;

    let count = ctx
        .products
        .count(&filters)
        .await
        .map_err(|_| response::Error::FailedToFetchProducts)?;

    Ok(response::Success::Products(Paginated::new(
        products,
        count,
        payload.pagination,
    )))
}

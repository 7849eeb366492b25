pub mod request {
    use crate::{
        modules::product::{price, repository},
        utils::pagination::Pagination,
    };
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct Filters {
        pub name: Option<String>,
        pub description: Option<String>,
        pub min_price: Option<String>,
        pub max_price: Option<String>,
    }

    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|value| !value.is_empty())
    }

    impl From<Filters> for repository::Filters {
        fn from(filters: Filters) -> Self {
            Self {
                name: non_empty(filters.name),
                description: non_empty(filters.description),
                min_price: filters.min_price.as_deref().and_then(price::parse),
                max_price: filters.max_price.as_deref().and_then(price::parse),
            }
        }
    }

    pub struct Payload {
        pub filters: Filters,
        pub pagination: Pagination,
    }

}

pub mod response {
    use crate::{modules::product::repository::Product, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Products(Paginated<Product>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Products(page) => (
                    StatusCode::OK,
                    Json(json!({
                        "products": page.items,
                        "count": page.count,
                        "totalPages": page.total_pages,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchProducts,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchProducts => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error retrieving products" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

pub mod request {
    use crate::modules::auth::middleware::AdminAuth;

    pub struct Payload {
        pub id: String,
        pub auth: AdminAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        ProductDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProductDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Product deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        ProductNotFound,
        FailedToDeleteProduct,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProductNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Product not found" })),
                )
                    .into_response(),
                Self::FailedToDeleteProduct => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error deleting product" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

pub mod request {
    use crate::modules::auth::middleware::AdminAuth;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;
    use validator::Validate;

    #[derive(TryFromMultipart, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 255))]
        pub name: Option<String>,
        #[validate(length(min = 1))]
        pub description: Option<String>,
        pub price: Option<String>,
        #[form_data(limit = "10MiB")]
        pub file: Option<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: AdminAuth,
    }
}

pub mod response {
    use crate::{modules::product::repository::Product, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        ProductCreated(Product),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProductCreated(product) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Product saved successfully",
                        "id": product.id
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingFields,
        NoFileUploaded,
        InvalidPrice,
        InvalidPayload(ValidationErrors),
        FailedToSaveProduct,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingFields => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Missing required fields" })),
                )
                    .into_response(),
                Self::NoFileUploaded => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No file uploaded" })),
                )
                    .into_response(),
                Self::InvalidPrice => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid price" })),
                )
                    .into_response(),
                Self::InvalidPayload(errors) => validation::into_response(errors).into_response(),
                Self::FailedToSaveProduct => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error saving product" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

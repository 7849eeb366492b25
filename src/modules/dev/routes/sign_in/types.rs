pub mod request {
    use serde::Deserialize;
    use validator::{Validate, ValidationError};

    fn validate_user_id(id: &str) -> Result<(), ValidationError> {
        if id.contains('|') || id.trim() != id {
            return Err(ValidationError::new("invalid_user_id"));
        }

        Ok(())
    }

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(min = 1, max = 64), custom(function = "validate_user_id"))]
        pub id: String,
        #[serde(default)]
        pub is_admin: bool,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Tokens(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Tokens(access_token) => (
                    StatusCode::OK,
                    Json(json!({ "access_token": access_token })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidPayload(ValidationErrors),
        FailedToCreateSession,
        FailedToFetchUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidPayload(errors) => validation::into_response(errors).into_response(),
                Self::FailedToCreateSession => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create session" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

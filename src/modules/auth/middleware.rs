use super::service;
use crate::modules::user::{self, repository::User};
use crate::types::Context;
use axum::{
    async_trait,
    extract::{Extension, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

enum Error {
    InvalidSession,
}

async fn get_user_from_token(ctx: Arc<Context>, access_token: &str) -> Result<User, Error> {
    let claims = service::auth::verify_access_token(&ctx.auth, access_token).map_err(|err| {
        tracing::debug!("Access token rejected: {:?}", err);
        Error::InvalidSession
    })?;

    ctx.users
        .find_by_id(&claims.subject.user_id)
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)
}

async fn get_user_from_request(parts: &mut Parts) -> Result<User, Response> {
    let Extension(ctx) = parts
        .extract::<Extension<Arc<Context>>>()
        .await
        .map_err(|err| {
            tracing::error!("Application context missing from request: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        })?;

    let err = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    );

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| err.clone().into_response())?;

    get_user_from_token(ctx, bearer.token())
        .await
        .map_err(|_| err.clone().into_response())
}

/// A request carrying a valid bearer token whose subject resolves to an admin
/// user. Runs before the body is read, so nothing is written on behalf of a
/// non-admin.
#[derive(Serialize, Clone, Debug)]
pub struct AdminAuth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = get_user_from_request(parts).await?;

        if !user::repository::is_admin(&user) {
            tracing::debug!("User {} is not allowed to modify products", user.id);
            return Err(
                (StatusCode::FORBIDDEN, Json(json!({ "error": "Forbidden" }))).into_response(),
            );
        }

        Ok(Self { user })
    }
}

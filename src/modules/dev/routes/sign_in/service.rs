use super::types::{request, response};
use crate::{
    modules::{
        auth::service::auth::{self, Subject},
        user::repository::UpsertUserPayload,
    },
    types::Context,
};
use std::sync::Arc;
use ulid::Ulid;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::InvalidPayload)?;

    let user = ctx
        .users
        .upsert(UpsertUserPayload {
            id: payload.id,
            is_admin: payload.is_admin,
        })
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?;

    tracing::debug!("Issuing development token for user {}", user.id);

    auth::issue_access_token(&ctx.auth, Subject::new(user.id, Some(Ulid::new().to_string())))
        .map_err(|_| response::Error::FailedToCreateSession)
        .map(response::Success::Tokens)
}

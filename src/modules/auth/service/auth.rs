use crate::types::AuthContext;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const SUBJECT_DELIMITER: char = '|';

#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedError,
    InvalidToken,
    ExpiredToken,
    InvalidSubject,
}

type Result<T> = std::result::Result<T, Error>;

/// Identity carried by an access token, encoded on the wire as
/// `<user id>|<extra>`. Only the user id takes part in authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub user_id: String,
    pub extra: Option<String>,
}

impl Subject {
    pub fn new(user_id: impl Into<String>, extra: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            extra,
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = raw.splitn(2, SUBJECT_DELIMITER);

        let user_id = segments
            .next()
            .map(str::trim)
            .filter(|user_id| !user_id.is_empty())
            .ok_or(Error::InvalidSubject)?;
        let extra = segments
            .next()
            .filter(|extra| !extra.is_empty())
            .map(String::from);

        Ok(Self::new(user_id, extra))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Some(extra) => write!(f, "{}{}{}", self.user_id, SUBJECT_DELIMITER, extra),
            None => write!(f, "{}", self.user_id),
        }
    }
}

impl Serialize for Subject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Subject::parse(&raw).map_err(|_| de::Error::custom("invalid token subject"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub subject: Subject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // `exp` is still checked whenever the token carries one.
    validation.required_spec_claims.clear();
    validation
}

pub fn issue_access_token(cfg: &AuthContext, subject: Subject) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        subject,
        exp: Some((now + cfg.access_token_ttl).timestamp()),
        iat: Some(now.timestamp()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!("Failed to sign access token: {}", err);
        Error::UnexpectedError
    })
}

pub fn verify_access_token(cfg: &AuthContext, access_token: &str) -> Result<Claims> {
    decode::<Claims>(
        access_token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => Error::ExpiredToken,
        _ => {
            tracing::debug!("Rejected access token: {}", err);
            Error::InvalidToken
        }
    })
}

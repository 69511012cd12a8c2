//! Request extractors with JSON error envelopes.
//!
//! [`ValidJson`] replaces `axum::Json` for request bodies so every decode
//! failure becomes a descriptive 400. [`PathId`] reads the `{id}` path
//! segment and answers 404 for anything that is not a positive integer.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use fairshare_core::types::DbId;
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::AppError;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Why a request body could not be decoded.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("body must not be larger than {MAX_BODY_BYTES} bytes")]
    TooLarge,

    #[error("body could not be read")]
    Unreadable,

    #[error("body must not be empty")]
    Empty,

    #[error("body contains badly-formed JSON (at line {line}, column {column})")]
    Malformed { line: usize, column: usize },

    #[error("body contains unknown key \"{0}\"")]
    UnknownField(String),

    #[error("body is missing required key \"{0}\"")]
    MissingField(String),

    #[error("body contains incorrect JSON type: {0}")]
    WrongType(String),

    #[error("body must only contain a single JSON value")]
    MultipleValues,
}

impl From<BodyError> for AppError {
    fn from(err: BodyError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Decode exactly one JSON value of type `T` from `bytes`.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BodyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyError::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut de).map_err(classify)?;
    de.end().map_err(|_| BodyError::MultipleValues)?;
    Ok(value)
}

fn classify(err: serde_json::Error) -> BodyError {
    match err.classify() {
        Category::Syntax | Category::Eof | Category::Io => BodyError::Malformed {
            line: err.line(),
            column: err.column(),
        },
        Category::Data => {
            // serde_json appends the position; keep only serde's own message.
            let full = err.to_string();
            let suffix = format!(" at line {} column {}", err.line(), err.column());
            let message = full.strip_suffix(&suffix).unwrap_or(&full);

            if let Some(rest) = message.strip_prefix("unknown field ") {
                BodyError::UnknownField(backticked(rest))
            } else if let Some(rest) = message.strip_prefix("missing field ") {
                BodyError::MissingField(backticked(rest))
            } else {
                BodyError::WrongType(message.to_string())
            }
        }
    }
}

/// The first `` `name` `` in a serde message.
fn backticked(text: &str) -> String {
    text.split('`').nth(1).unwrap_or(text).to_string()
}

/// JSON body extractor that rejects with [`AppError::BadRequest`].
///
/// Unlike `axum::Json` it ignores `Content-Type` and refuses trailing data
/// after the first value.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &AppState) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|err| {
                if err.into_inner().is::<LengthLimitError>() {
                    BodyError::TooLarge
                } else {
                    BodyError::Unreadable
                }
            })?;
        Ok(ValidJson(decode_json(&bytes)?))
    }
}

/// Positive integer id from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub DbId);

impl FromRequestParts<AppState> for PathId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        parse_id(&raw).map(PathId).ok_or(AppError::NotFound)
    }
}

fn parse_id(raw: &str) -> Option<DbId> {
    raw.parse::<DbId>().ok().filter(|id| *id >= 1)
}

//! Query parameter readers for list endpoints.
//!
//! Numbers arrive as raw strings so a malformed value becomes a field
//! failure on the shared [`Validator`] instead of an opaque rejection.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use fairshare_core::error::CoreError;
use fairshare_core::group::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT};
use fairshare_core::validation::Validator;
use fairshare_db::models::group::{GroupFilter, GroupQuery};
use serde::Deserialize;

use crate::error::AppError;

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// `?name=&currency=&description=&page=&page_size=&sort=` for `GET /groups`.
#[derive(Debug, Default, Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct GroupListParams {
    pub name: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

impl GroupListParams {
    /// Read the raw strings, recording integer parse failures on `v`.
    pub fn into_group_query(self, v: &mut Validator) -> GroupQuery {
        GroupQuery {
            page: read_int(v, self.page.as_deref(), "page", DEFAULT_PAGE),
            page_size: read_int(v, self.page_size.as_deref(), "page_size", DEFAULT_PAGE_SIZE),
            name: self.name.unwrap_or_default(),
            currency: self.currency.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            sort: self
                .sort
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SORT.to_string()),
        }
    }

    /// Read and validate in one pass. Parse failures and range failures are
    /// reported together.
    pub fn into_filter(self) -> Result<GroupFilter, CoreError> {
        let mut v = Validator::new();
        let query = self.into_group_query(&mut v);
        query.validate_with(v)
    }
}

/// Absent or empty gives `default`; anything else must parse as an integer.
pub fn read_int(v: &mut Validator, raw: Option<&str>, key: &str, default: i64) -> i64 {
    match raw {
        None | Some("") => default,
        Some(s) => s.parse().unwrap_or_else(|_| {
            v.add(key, "must be an integer");
            default
        }),
    }
}

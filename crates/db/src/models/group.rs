//! Group entity model, request DTOs, and listing filter.

use fairshare_core::error::CoreError;
use fairshare_core::group::{
    check_group_fields, check_query_fields, Currency, SortOrder, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, DEFAULT_SORT,
};
use fairshare_core::pagination;
use fairshare_core::types::{DbId, Timestamp, Version};
use fairshare_core::validation::Validator;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `groups` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub name: String,
    pub currency: String,
    pub description: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub version: Version,
}

impl Group {
    /// Full-entity rule shared by replace and merged patches.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        check_group_fields(&mut v, &self.name, &self.currency);
        v.finish()
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a new group.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGroup {
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    pub created_by: DbId,
}

impl CreateGroup {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        check_group_fields(&mut v, &self.name, &self.currency);
        v.finish()
    }
}

/// DTO for replacing every mutable field of a group.
///
/// `version` is the version the client last read; the write only lands if
/// the row still carries it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceGroup {
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    pub version: Version,
}

impl ReplaceGroup {
    /// Overwrite the mutable fields of `current` and target `self.version`.
    pub fn apply_to(self, current: Group) -> Group {
        Group {
            name: self.name,
            currency: self.currency,
            description: self.description,
            version: self.version,
            ..current
        }
    }
}

/// DTO for a partial update. Absent fields keep their stored value.
///
/// When `version` is given it replaces the snapshot's version as the
/// expected one, letting a client pin the patch to the state it last saw.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchGroup {
    pub name: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub version: Option<Version>,
}

impl PatchGroup {
    /// Merge the present fields onto a fetched snapshot.
    pub fn apply_to(self, mut current: Group) -> Group {
        if let Some(name) = self.name {
            current.name = name;
        }
        if let Some(currency) = self.currency {
            current.currency = currency;
        }
        if let Some(description) = self.description {
            current.description = description;
        }
        if let Some(version) = self.version {
            current.version = version;
        }
        current
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Unvalidated listing parameters. Empty strings disable their filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuery {
    /// Case-insensitive substring of the name.
    pub name: String,
    /// Exact currency.
    pub currency: String,
    /// Full-text terms matched against the description.
    pub description: String,
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
}

impl Default for GroupQuery {
    fn default() -> Self {
        Self {
            name: String::new(),
            currency: String::new(),
            description: String::new(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

impl GroupQuery {
    pub fn validate(self) -> Result<GroupFilter, CoreError> {
        self.validate_with(Validator::new())
    }

    /// Validate on top of `v`, which may already carry failures recorded
    /// while reading the raw parameters.
    pub fn validate_with(self, mut v: Validator) -> Result<GroupFilter, CoreError> {
        check_query_fields(&mut v, &self.currency, self.page, self.page_size, &self.sort);
        let sort = SortOrder::parse(&self.sort);
        let currency = match self.currency.as_str() {
            "" => None,
            raw => raw.parse::<Currency>().ok(),
        };
        v.finish()?;

        // `check_query_fields` rejects every sort and currency string the
        // parsers refuse.
        let sort = sort.unwrap_or_default();
        Ok(GroupFilter {
            name: self.name,
            currency,
            description: self.description,
            page: self.page,
            page_size: self.page_size,
            sort,
        })
    }
}

/// Listing parameters that passed validation.
///
/// Only [`GroupQuery::validate`] builds one, so a store receiving a
/// `GroupFilter` can rely on in-range paging and a known sort column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFilter {
    name: String,
    currency: Option<Currency>,
    description: String,
    page: i64,
    page_size: i64,
    sort: SortOrder,
}

impl GroupFilter {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` when listing every currency.
    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn offset(&self) -> i64 {
        pagination::offset(self.page, self.page_size)
    }
}

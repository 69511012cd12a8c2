//! Group domain rules: supported currencies, sortable fields, page bounds,
//! and the field checks shared by every group input shape.
//!
//! The sort enumeration doubles as the only source of SQL identifiers for
//! `ORDER BY`; callers never interpolate request text into a query.

use std::str::FromStr;

use crate::validation::Validator;

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Currencies a group may be denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Dollar,
    Euro,
    Pound,
    Naira,
}

impl Currency {
    pub const ALL: [Currency; 4] = [
        Currency::Dollar,
        Currency::Euro,
        Currency::Pound,
        Currency::Naira,
    ];

    /// Stored and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Currency::Dollar => "Dollar",
            Currency::Euro => "Euro",
            Currency::Pound => "Pound",
            Currency::Naira => "Naira",
        }
    }
}

/// Names accepted in the `currency` field, in declaration order.
pub const CURRENCY_NAMES: [&str; 4] = [
    Currency::Dollar.as_str(),
    Currency::Euro.as_str(),
    Currency::Pound.as_str(),
    Currency::Naira.as_str(),
];

impl FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Returned when a string names no member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns a group listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Currency,
    CreatedAt,
    #[default]
    Id,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Name,
        SortField::Currency,
        SortField::CreatedAt,
        SortField::Id,
    ];

    /// Name used in the `sort` query parameter.
    pub const fn name(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Currency => "currency",
            SortField::CreatedAt => "created_at",
            SortField::Id => "id",
        }
    }

    /// SQL column identifier. This table is the only path by which a sort
    /// choice reaches query text.
    pub const fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Currency => "currency",
            SortField::CreatedAt => "created_at",
            SortField::Id => "id",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SortField::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Names accepted (before the direction suffix) in the `sort` parameter.
pub const SORT_FIELD_NAMES: [&str; 4] = [
    SortField::Name.name(),
    SortField::Currency.name(),
    SortField::CreatedAt.name(),
    SortField::Id.name(),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated sort choice. Defaults to ascending by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Parse a raw `sort` parameter such as `name`, `created_at-` or `id+`.
    ///
    /// A trailing `-` selects descending order; a leftover trailing `+` is
    /// dropped. An empty string yields the default order. Returns `None` for
    /// any field outside [`SORT_FIELD_NAMES`].
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return Some(Self::default());
        }
        let (name, direction) = split_sort(raw);
        SortField::from_name(name).map(|field| SortOrder { field, direction })
    }
}

/// Split a raw sort parameter into its field name and direction.
fn split_sort(raw: &str) -> (&str, SortDirection) {
    let (name, direction) = match raw.strip_suffix('-') {
        Some(rest) => (rest, SortDirection::Desc),
        None => (raw, SortDirection::Asc),
    };
    (name.strip_suffix('+').unwrap_or(name), direction)
}

// ---------------------------------------------------------------------------
// Limits and defaults
// ---------------------------------------------------------------------------

/// Minimum number of characters in a group name.
pub const MIN_NAME_CHARS: usize = 2;

pub const MIN_PAGE: i64 = 1;
pub const MAX_PAGE: i64 = 10_000_000;

pub const MIN_PAGE_SIZE: i64 = 1;
pub const MAX_PAGE_SIZE: i64 = 100;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Checks applied to every full group shape (create, replace, merged patch).
pub fn check_group_fields(v: &mut Validator, name: &str, currency: &str) {
    v.check(
        name.chars().count() >= MIN_NAME_CHARS,
        "name",
        format!("must be at least {MIN_NAME_CHARS} characters long"),
    );
    v.check(
        Validator::is_in(currency, &CURRENCY_NAMES),
        "currency",
        format!("unsupported currency, must be one of: {}", CURRENCY_NAMES.join(", ")),
    );
}

/// Checks applied to listing filters. An empty currency or sort means
/// "no filter" / "default order" and is accepted.
pub fn check_query_fields(
    v: &mut Validator,
    currency: &str,
    page: i64,
    page_size: i64,
    sort: &str,
) {
    v.check(
        currency.is_empty() || Validator::is_in(currency, &CURRENCY_NAMES),
        "currency",
        format!("unsupported currency, must be one of: {}", CURRENCY_NAMES.join(", ")),
    );
    v.check(
        (MIN_PAGE..=MAX_PAGE).contains(&page),
        "page",
        format!("must be between {MIN_PAGE} and {MAX_PAGE}"),
    );
    v.check(
        (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size),
        "page_size",
        format!("must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}"),
    );
    let (field, _) = split_sort(sort);
    v.check(
        sort.is_empty() || Validator::is_in(field, &SORT_FIELD_NAMES),
        "sort",
        format!(
            "unsupported sort field, must be one of: {} (append '-' for descending)",
            SORT_FIELD_NAMES.join(", ")
        ),
    );
}

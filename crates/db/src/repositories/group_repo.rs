//! Repository for the `groups` table.

use fairshare_core::group::Currency;
use fairshare_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::group::{CreateGroup, Group, GroupFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, currency, description, created_by, created_at, version";

/// A listing row: the group plus the window count of all matching rows.
#[derive(Debug, FromRow)]
struct GroupPageRow {
    total: i64,
    #[sqlx(flatten)]
    group: Group,
}

/// Provides CRUD and filtered listing for groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group, returning the created row with its generated
    /// `id`, `created_at`, and initial `version`.
    pub async fn create(pool: &PgPool, input: &CreateGroup) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO groups (name, currency, description, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(&input.name)
            .bind(&input.currency)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a group by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE id = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite name, currency and description if the row still carries
    /// `group.version`, bumping the version by one.
    ///
    /// Returns `None` when no row has both `group.id` and `group.version`,
    /// whether because it was deleted or because another writer got there
    /// first.
    pub async fn update_versioned(
        pool: &PgPool,
        group: &Group,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "UPDATE groups SET \
                name = $1, \
                currency = $2, \
                description = $3, \
                version = version + 1 \
             WHERE id = $4 AND version = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(&group.name)
            .bind(&group.currency)
            .bind(&group.description)
            .bind(group.id)
            .bind(group.version)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a group by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List one page of groups matching `filter`, together with the number
    /// of matching rows across all pages.
    ///
    /// The name and description filters are no-ops for an empty string, the
    /// currency filter for `None`. The parameter list is the
    /// same for every call; only the `ORDER BY` identifiers vary, and those
    /// come from the fixed sort-field table. `id ASC` always breaks ties so
    /// rows do not drift between pages.
    ///
    /// The total rides on every row as a window count, so a page past the
    /// end reports a total of 0.
    pub async fn list(pool: &PgPool, filter: &GroupFilter) -> Result<(Vec<Group>, i64), sqlx::Error> {
        let sort = filter.sort();
        let query = format!(
            "SELECT count(*) OVER() AS total, {COLUMNS} \
             FROM groups \
             WHERE (name ILIKE '%' || $1 || '%' OR $1 = '') \
               AND ($2::text IS NULL OR currency = $2) \
               AND (to_tsvector('simple', description) @@ plainto_tsquery('simple', $3) OR $3 = '') \
             ORDER BY {column} {direction}, id ASC \
             LIMIT $4 OFFSET $5",
            column = sort.field.column(),
            direction = sort.direction.as_sql(),
        );
        let rows = sqlx::query_as::<_, GroupPageRow>(&query)
            .bind(escape_like(filter.name()))
            .bind(filter.currency().map(Currency::as_str))
            .bind(filter.description())
            .bind(filter.page_size())
            .bind(filter.offset())
            .fetch_all(pool)
            .await?;

        let total = rows.first().map_or(0, |r| r.total);
        let groups = rows.into_iter().map(|r| r.group).collect();
        Ok((groups, total))
    }
}

/// Escape `LIKE` wildcards so the name filter is a literal substring match.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

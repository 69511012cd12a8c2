//! The group store seam.
//!
//! Handlers talk to groups only through [`GroupStore`]. [`PgGroupStore`] is
//! the production implementation over an injected pool;
//! [`MemoryGroupStore`](crate::memory::MemoryGroupStore) is the in-process
//! double used by HTTP tests.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use fairshare_core::pagination::MetaData;
use fairshare_core::types::DbId;

use crate::error::DbError;
use crate::models::group::{CreateGroup, Group, GroupFilter};
use crate::repositories::GroupRepo;
use crate::DbPool;

/// Group persistence with optimistic concurrency.
///
/// Every id-addressed operation treats `id < 1` as [`DbError::NotFound`]
/// without touching storage. No operation retries.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Persist a validated group. The store assigns `id`, `created_at` and
    /// the initial `version`.
    async fn insert(&self, input: &CreateGroup) -> Result<Group, DbError>;

    async fn get(&self, id: DbId) -> Result<Group, DbError>;

    /// Compare-and-swap on `(group.id, group.version)`: writes the mutable
    /// fields and returns the row with `version + 1`. A missing row and a
    /// stale version both yield [`DbError::NotFound`].
    async fn update(&self, group: &Group) -> Result<Group, DbError>;

    async fn delete(&self, id: DbId) -> Result<(), DbError>;

    /// One page of matching groups plus pagination metadata.
    async fn list(&self, filter: &GroupFilter) -> Result<(Vec<Group>, MetaData), DbError>;

    /// Cheap reachability check for health reporting.
    async fn ping(&self) -> Result<(), DbError>;
}

/// PostgreSQL-backed [`GroupStore`]. Each call is a single statement bounded
/// by `query_timeout`.
#[derive(Clone)]
pub struct PgGroupStore {
    pool: DbPool,
    query_timeout: Duration,
}

impl PgGroupStore {
    pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Run `fut` under the query timeout, mapping expiry to
    /// [`DbError::Timeout`].
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result.map_err(DbError::from),
            Err(_) => {
                tracing::warn!(
                    op,
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    "Group query timed out",
                );
                Err(DbError::Timeout(self.query_timeout))
            }
        }
    }
}

#[async_trait]
impl GroupStore for PgGroupStore {
    async fn insert(&self, input: &CreateGroup) -> Result<Group, DbError> {
        self.bounded("insert", GroupRepo::create(&self.pool, input))
            .await
    }

    async fn get(&self, id: DbId) -> Result<Group, DbError> {
        if id < 1 {
            return Err(DbError::group_not_found(id));
        }
        self.bounded("get", GroupRepo::find_by_id(&self.pool, id))
            .await?
            .ok_or_else(|| DbError::group_not_found(id))
    }

    async fn update(&self, group: &Group) -> Result<Group, DbError> {
        if group.id < 1 {
            return Err(DbError::group_not_found(group.id));
        }
        match self
            .bounded("update", GroupRepo::update_versioned(&self.pool, group))
            .await?
        {
            Some(updated) => Ok(updated),
            None => {
                tracing::debug!(
                    id = group.id,
                    version = group.version,
                    "Group update matched no row (missing or stale version)",
                );
                Err(DbError::group_not_found(group.id))
            }
        }
    }

    async fn delete(&self, id: DbId) -> Result<(), DbError> {
        if id < 1 {
            return Err(DbError::group_not_found(id));
        }
        let deleted = self
            .bounded("delete", GroupRepo::hard_delete(&self.pool, id))
            .await?;
        if deleted {
            Ok(())
        } else {
            Err(DbError::group_not_found(id))
        }
    }

    async fn list(&self, filter: &GroupFilter) -> Result<(Vec<Group>, MetaData), DbError> {
        let (groups, total) = self
            .bounded("list", GroupRepo::list(&self.pool, filter))
            .await?;
        Ok((groups, MetaData::new(filter.page(), filter.page_size(), total)))
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.bounded("ping", crate::health_check(&self.pool)).await
    }
}

//! In-process [`GroupStore`] used by HTTP tests and local experiments.
//!
//! Follows the Postgres store on sequential ids that are never reused,
//! version compare-and-swap on update, `id ASC` tie-breaking, and
//! window-count totals (a page past the end reports a total of 0).
//!
//! The description filter only approximates the `simple` text-search parser:
//! words are whitespace-separated with surrounding punctuation trimmed, so
//! an address like `bob@example.com` stays one word. Hyphenated compounds are
//! not split into their parts as Postgres does.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use fairshare_core::group::{SortDirection, SortField};
use fairshare_core::pagination::MetaData;
use fairshare_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::models::group::{CreateGroup, Group, GroupFilter};
use crate::store::GroupStore;

#[derive(Debug, Default)]
struct State {
    last_id: DbId,
    rows: BTreeMap<DbId, Group>,
}

#[derive(Debug, Default)]
pub struct MemoryGroupStore {
    state: RwLock<State>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for MemoryGroupStore {
    async fn insert(&self, input: &CreateGroup) -> Result<Group, DbError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let group = Group {
            id: state.last_id,
            name: input.name.clone(),
            currency: input.currency.clone(),
            description: input.description.clone(),
            created_by: input.created_by,
            created_at: Utc::now(),
            version: 1,
        };
        state.rows.insert(group.id, group.clone());
        Ok(group)
    }

    async fn get(&self, id: DbId) -> Result<Group, DbError> {
        self.state
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::group_not_found(id))
    }

    async fn update(&self, group: &Group) -> Result<Group, DbError> {
        let mut state = self.state.write().await;
        match state.rows.get_mut(&group.id) {
            Some(row) if row.version == group.version => {
                row.name = group.name.clone();
                row.currency = group.currency.clone();
                row.description = group.description.clone();
                row.version += 1;
                Ok(row.clone())
            }
            _ => Err(DbError::group_not_found(group.id)),
        }
    }

    async fn delete(&self, id: DbId) -> Result<(), DbError> {
        match self.state.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DbError::group_not_found(id)),
        }
    }

    async fn list(&self, filter: &GroupFilter) -> Result<(Vec<Group>, MetaData), DbError> {
        let state = self.state.read().await;
        let name = filter.name().to_lowercase();
        let terms = search_terms(filter.description());

        let mut matching: Vec<&Group> = state
            .rows
            .values()
            .filter(|g| name.is_empty() || g.name.to_lowercase().contains(&name))
            .filter(|g| filter.currency().map_or(true, |c| g.currency == c.as_str()))
            .filter(|g| filter.description().is_empty() || matches_terms(&g.description, &terms))
            .collect();

        let sort = filter.sort();
        matching.sort_by(|a, b| {
            let by_field = compare_field(a, b, sort.field);
            let by_field = match sort.direction {
                SortDirection::Asc => by_field,
                SortDirection::Desc => by_field.reverse(),
            };
            by_field.then(a.id.cmp(&b.id))
        });

        let total = matching.len() as i64;
        let page: Vec<Group> = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.page_size() as usize)
            .cloned()
            .collect();
        let total = if page.is_empty() { 0 } else { total };

        Ok((page, MetaData::new(filter.page(), filter.page_size(), total)))
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

fn compare_field(a: &Group, b: &Group, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Currency => a.currency.cmp(&b.currency),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Id => a.id.cmp(&b.id),
    }
}

/// Lowercased whitespace-separated words with leading and trailing
/// punctuation removed.
fn search_terms(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every query term must appear as a whole word of `description`.
fn matches_terms(description: &str, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }
    let words = search_terms(description);
    terms.iter().all(|t| words.contains(t))
}

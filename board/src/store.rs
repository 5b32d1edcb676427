//! The hosted-table seam.
//!
//! Everything the board asks of the remote store fits three operations, so
//! the table is a trait and the HTTP client is just one implementation.
//! Tests drive the same sessions over [`MemoryTable`].

use async_trait::async_trait;
use facts::{CategoryFilter, Fact, FactId, NewFact, VoteKind};

use crate::error::StoreError;

/// One list request: fixed ordering (interesting votes descending), an
/// optional category equality filter, a row cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: CategoryFilter,
    pub limit: u32,
}

/// The remote `facts` table.
#[async_trait]
pub trait FactsTable {
    /// Rows ordered by interesting votes descending, capped at
    /// `query.limit`, filtered by category unless the filter is the
    /// all-categories sentinel.
    async fn list(&self, query: ListQuery) -> Result<Vec<Fact>, StoreError>;

    /// Stores a validated submission and returns the row as stored
    /// (server-assigned id included).
    async fn insert(&self, fact: &NewFact) -> Result<Fact, StoreError>;

    /// Writes one vote counter on the row matching `id` and returns the
    /// updated row.
    async fn set_votes(&self, id: FactId, kind: VoteKind, value: u32) -> Result<Fact, StoreError>;
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use facts::{Fact, FactId, NewFact, VoteKind};

    use super::{FactsTable, ListQuery};
    use crate::error::StoreError;

    #[derive(Default)]
    struct Inner {
        rows: Vec<Fact>,
        seen: Vec<ListQuery>,
        insert_calls: u32,
        next_id: FactId,
        fail: bool,
    }

    /// In-memory table double. Applies the same ordering/filter/limit
    /// semantics the hosted table would, and records what it was asked so
    /// tests can check which queries actually went out.
    #[derive(Default)]
    pub struct MemoryTable {
        inner: Mutex<Inner>,
    }

    impl MemoryTable {
        pub fn with_rows(rows: Vec<Fact>) -> Self {
            let next_id = rows.iter().map(|fact| fact.id).max().unwrap_or(0) + 1;
            Self {
                inner: Mutex::new(Inner {
                    rows,
                    next_id,
                    ..Inner::default()
                }),
            }
        }

        /// Makes every following operation fail with a 500.
        pub fn go_offline(&self) {
            self.inner.lock().unwrap().fail = true;
        }

        pub fn seen_queries(&self) -> Vec<ListQuery> {
            self.inner.lock().unwrap().seen.clone()
        }

        pub fn insert_calls(&self) -> u32 {
            self.inner.lock().unwrap().insert_calls
        }

        pub fn rows(&self) -> Vec<Fact> {
            self.inner.lock().unwrap().rows.clone()
        }

        fn check_online(inner: &Inner) -> Result<(), StoreError> {
            if inner.fail {
                return Err(StoreError::Status {
                    status: 500,
                    body: "table offline".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl FactsTable for MemoryTable {
        async fn list(&self, query: ListQuery) -> Result<Vec<Fact>, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            inner.seen.push(query);
            Self::check_online(&inner)?;

            let mut rows: Vec<Fact> = inner
                .rows
                .iter()
                .filter(|fact| {
                    query
                        .filter
                        .category()
                        .is_none_or(|category| fact.category == category)
                })
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.votes_interesting.cmp(&a.votes_interesting));
            rows.truncate(query.limit as usize);

            Ok(rows)
        }

        async fn insert(&self, fact: &NewFact) -> Result<Fact, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            inner.insert_calls += 1;
            Self::check_online(&inner)?;

            let row = Fact {
                id: inner.next_id,
                text: fact.text.clone(),
                source: fact.source.clone(),
                category: fact.category,
                votes_interesting: fact.votes_interesting,
                votes_mindblowing: fact.votes_mindblowing,
                votes_false: fact.votes_false,
                created_in: fact.created_in,
            };
            inner.next_id += 1;
            inner.rows.push(row.clone());

            Ok(row)
        }

        async fn set_votes(
            &self,
            id: FactId,
            kind: VoteKind,
            value: u32,
        ) -> Result<Fact, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            Self::check_online(&inner)?;

            let row = inner
                .rows
                .iter_mut()
                .find(|fact| fact.id == id)
                .ok_or(StoreError::EmptyReturn)?;
            row.set_vote_count(kind, value);

            Ok(row.clone())
        }
    }
}

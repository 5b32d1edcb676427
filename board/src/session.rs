//! # Session
//!
//! The board's single owned state: the fact snapshot, the active filter,
//! the form draft, and the in-flight flags. Views read accessors; user
//! actions are explicit transitions.
//!
//! Every remote interaction is split into a `begin_*` half that stamps a
//! ticket and an `apply_*` half that folds the response back in. The async
//! drivers (`refresh`, `submit`, `vote`) run both halves against the
//! table; tests interleave the halves directly to pin down the races the
//! event loop allows — a fetch response arriving after a newer filter
//! change, or two vote buttons of the same fact resolving out of order.

use std::collections::HashSet;

use chrono::{Datelike, Local};
use facts::{Category, CategoryFilter, Fact, FactDraft, FactId, NewFact, VoteKind, MAX_TEXT_LEN};
use tracing::{debug, warn};

use crate::{
    error::{BoardError, StoreError, ValidationError},
    store::{FactsTable, ListQuery},
};

/// Shown under the list when no facts match the active filter.
pub const EMPTY_MESSAGE: &str = "No facts for this category yet! Create the first one";

pub const DEFAULT_FETCH_LIMIT: u32 = 1000;

/// One in-flight list fetch. The generation ties the eventual response to
/// the filter state that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub query: ListQuery,
}

/// One in-flight vote update: which counter, and the value to write
/// (current local count + 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTicket {
    pub id: FactId,
    pub kind: VoteKind,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch superseded this one; the response was discarded.
    Stale,
}

pub struct Session<S> {
    table: S,
    fetch_limit: u32,
    facts: Vec<Fact>,
    filter: CategoryFilter,
    loading: bool,
    show_form: bool,
    uploading: bool,
    draft: FactDraft,
    pending_votes: HashSet<(FactId, VoteKind)>,
    generation: u64,
}

impl<S> Session<S> {
    pub fn new(table: S) -> Self {
        Self::with_limit(table, DEFAULT_FETCH_LIMIT)
    }

    pub fn with_limit(table: S, fetch_limit: u32) -> Self {
        Self {
            table,
            fetch_limit,
            facts: Vec::new(),
            filter: CategoryFilter::All,
            loading: false,
            show_form: false,
            uploading: false,
            draft: FactDraft::default(),
            pending_votes: HashSet::new(),
            generation: 0,
        }
    }

    // ------------------------------------------------------------------
    // View accessors
    // ------------------------------------------------------------------

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn form_open(&self) -> bool {
        self.show_form
    }

    pub fn draft(&self) -> &FactDraft {
        &self.draft
    }

    pub fn remaining_chars(&self) -> usize {
        self.draft.remaining_chars()
    }

    /// True while this exact button's update is in flight; only that one
    /// button is disabled, not the whole fact.
    pub fn is_vote_pending(&self, id: FactId, kind: VoteKind) -> bool {
        self.pending_votes.contains(&(id, kind))
    }

    /// Empty-state line, present exactly when the snapshot has no rows.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.facts.is_empty().then_some(EMPTY_MESSAGE)
    }

    // ------------------------------------------------------------------
    // Header / form inputs
    // ------------------------------------------------------------------

    pub fn toggle_form(&mut self) {
        self.show_form = !self.show_form;
    }

    pub fn form_button_label(&self) -> &'static str {
        if self.show_form {
            "Close"
        } else {
            "Share a fact"
        }
    }

    /// Controlled text input; clamps at the bound like the form's
    /// max-length attribute.
    pub fn set_text(&mut self, text: &str) {
        self.draft.text = text.chars().take(MAX_TEXT_LEN).collect();
    }

    pub fn set_source(&mut self, source: &str) {
        self.draft.source = source.to_string();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.draft.category = category;
    }

    // ------------------------------------------------------------------
    // Fetch
    // ------------------------------------------------------------------

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            query: ListQuery {
                filter: self.filter,
                limit: self.fetch_limit,
            },
        }
    }

    /// Folds a fetch response in. Responses from superseded tickets are
    /// discarded so an older filter's rows can never clobber a newer
    /// filter's. A failed current fetch leaves the snapshot as it was and
    /// hands the error to the caller to surface.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Fact>, StoreError>,
    ) -> Result<FetchOutcome, BoardError> {
        if ticket.generation != self.generation {
            debug!(
                "dropping stale fetch, generation {} superseded by {}",
                ticket.generation, self.generation
            );
            return Ok(FetchOutcome::Stale);
        }

        self.loading = false;
        match result {
            Ok(rows) => {
                self.facts = rows;
                Ok(FetchOutcome::Applied)
            }
            Err(e) => Err(e.into()),
        }
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Validates the draft. Invalid input blocks here, before any table
    /// call, with the inputs kept as typed.
    pub fn begin_submit(&mut self) -> Result<NewFact, ValidationError> {
        let new_fact = self.draft.validate(Local::now().year())?;
        self.uploading = true;
        Ok(new_fact)
    }

    /// On success, prepends the stored row (not re-sorted), clears all
    /// three inputs, and closes the form. On a table failure everything
    /// stays: list, inputs, open form.
    pub fn apply_submit(&mut self, result: Result<Fact, StoreError>) -> Result<(), BoardError> {
        self.uploading = false;
        match result {
            Ok(row) => {
                self.facts.insert(0, row);
                self.draft.clear();
                self.show_form = false;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // ------------------------------------------------------------------
    // Vote
    // ------------------------------------------------------------------

    /// Stamps a vote ticket, or `None` when that exact button is already
    /// in flight (it is disabled) or the fact left the snapshot. No
    /// optimistic bump happens; the new value is computed here and only
    /// the returned row mutates the snapshot.
    pub fn begin_vote(&mut self, id: FactId, kind: VoteKind) -> Option<VoteTicket> {
        if self.pending_votes.contains(&(id, kind)) {
            return None;
        }
        let current = self.facts.iter().find(|fact| fact.id == id)?.vote_count(kind);
        self.pending_votes.insert((id, kind));
        Some(VoteTicket {
            id,
            kind,
            value: current + 1,
        })
    }

    /// Re-enables the button and swaps the returned row in by id;
    /// concurrent resolutions on the same fact are last-write-wins. A
    /// table failure is logged and dropped — nothing local changed, so
    /// there is nothing to roll back.
    pub fn apply_vote(&mut self, ticket: VoteTicket, result: Result<Fact, StoreError>) {
        self.pending_votes.remove(&(ticket.id, ticket.kind));
        match result {
            Ok(row) => {
                if let Some(slot) = self.facts.iter_mut().find(|fact| fact.id == ticket.id) {
                    *slot = row;
                }
            }
            Err(e) => warn!("vote on fact {} not recorded: {e}", ticket.id),
        }
    }
}

impl<S: FactsTable> Session<S> {
    /// Fetch driver: mount and every filter change go through here.
    pub async fn refresh(&mut self) -> Result<(), BoardError> {
        let ticket = self.begin_fetch();
        let result = self.table.list(ticket.query).await;
        self.apply_fetch(ticket, result).map(|_| ())
    }

    pub async fn select_filter(&mut self, filter: CategoryFilter) -> Result<(), BoardError> {
        self.set_filter(filter);
        self.refresh().await
    }

    pub async fn submit(&mut self) -> Result<(), BoardError> {
        if self.uploading {
            return Ok(());
        }
        let new_fact = self.begin_submit()?;
        let result = self.table.insert(&new_fact).await;
        self.apply_submit(result)
    }

    pub async fn vote(&mut self, id: FactId, kind: VoteKind) {
        let Some(ticket) = self.begin_vote(id, kind) else {
            return;
        };
        let result = self.table.set_votes(ticket.id, ticket.kind, ticket.value).await;
        self.apply_vote(ticket, result);
    }
}

//! # Facts
//!
//! Shared domain types for the "Today I Learned" board.
//!
//! The hosted `facts` table is the single source of truth; everything in
//! this crate mirrors its row shape. Column names on the wire are
//! camelCase (`votesInteresting`, `createdIn`), so the serde renames here
//! must stay in sync with the table schema.

use serde::{Deserialize, Serialize};

pub mod categories;
pub mod validate;

pub use categories::{Category, CategoryFilter, UnknownCategory};
pub use validate::{FactDraft, NewFact, ValidationError, MAX_TEXT_LEN};

pub type FactId = i64;

/// One user-submitted claim plus its vote counters, as stored in the
/// hosted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub id: FactId,
    pub text: String,
    pub source: String,
    pub category: Category,
    pub votes_interesting: u32,
    pub votes_mindblowing: u32,
    pub votes_false: u32,
    pub created_in: i32,
}

impl Fact {
    /// Skeptical votes outweigh the combined supportive ones.
    pub fn is_disputed(&self) -> bool {
        self.votes_interesting + self.votes_mindblowing < self.votes_false
    }

    pub fn vote_count(&self, kind: VoteKind) -> u32 {
        match kind {
            VoteKind::Interesting => self.votes_interesting,
            VoteKind::Mindblowing => self.votes_mindblowing,
            VoteKind::False => self.votes_false,
        }
    }

    pub fn set_vote_count(&mut self, kind: VoteKind, value: u32) {
        match kind {
            VoteKind::Interesting => self.votes_interesting = value,
            VoteKind::Mindblowing => self.votes_mindblowing = value,
            VoteKind::False => self.votes_false = value,
        }
    }
}

/// The three vote buttons on a fact. Each maps to one counter column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    Interesting,
    Mindblowing,
    False,
}

impl VoteKind {
    pub const ALL: [VoteKind; 3] = [VoteKind::Interesting, VoteKind::Mindblowing, VoteKind::False];

    /// The table column this kind counts into.
    pub fn column(self) -> &'static str {
        match self {
            VoteKind::Interesting => "votesInteresting",
            VoteKind::Mindblowing => "votesMindblowing",
            VoteKind::False => "votesFalse",
        }
    }

    pub fn from_column(column: &str) -> Option<VoteKind> {
        VoteKind::ALL.into_iter().find(|kind| kind.column() == column)
    }
}

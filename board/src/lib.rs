//! # Board
//!
//! Application core of the "Today I Learned" fact board.
//!
//! The board is a thin client over one hosted table: fetch the facts
//! (optionally filtered by category, always ordered by interesting votes),
//! submit a validated new fact, bump a vote counter. All of that state
//! lives in a single [`session::Session`] that owns the list snapshot and
//! exposes explicit transitions instead of scattering it across views.
//!
//! ## Flow
//!
//! - On startup (and on every filter change) the session issues a list
//!   fetch; the response replaces the snapshot wholesale.
//! - A submission is validated locally first; only a clean draft reaches
//!   the table. The returned row is prepended, unsorted, so the author
//!   sees it immediately.
//! - A vote writes `current + 1` into one counter column and swaps the
//!   returned row into the snapshot by id.
//!
//! ## Failure policy
//!
//! Validation failures never touch the table and keep the inputs as they
//! were. Table failures never touch local state: a failed fetch leaves the
//! previous snapshot, a failed insert keeps the form filled, a failed vote
//! is logged and dropped (there is no optimistic bump to roll back).

pub mod config;
pub mod error;
pub mod remote;
pub mod session;
pub mod store;

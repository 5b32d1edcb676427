//! Draft validation.
//!
//! The form buffers are free text; a draft only becomes a [`NewFact`] once
//! every field passes. Invalid drafts block submission before any remote
//! call happens.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::categories::Category;

/// Hard bound on fact text; the input clamps at this length.
pub const MAX_TEXT_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("fact text is empty")]
    EmptyText,
    #[error("fact text is {0} chars, limit is {MAX_TEXT_LEN}")]
    TextTooLong(usize),
    #[error("source is not an http(s) URL")]
    BadSource,
    #[error("no category chosen")]
    NoCategory,
}

/// The three controlled form inputs, held as typed while typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactDraft {
    pub text: String,
    pub source: String,
    pub category: Option<Category>,
}

impl FactDraft {
    pub fn clear(&mut self) {
        *self = FactDraft::default();
    }

    /// Characters still available under the text bound.
    pub fn remaining_chars(&self) -> usize {
        MAX_TEXT_LEN.saturating_sub(self.text.chars().count())
    }

    /// Checks every field and stamps the submission year. Counters start
    /// at zero.
    pub fn validate(&self, created_in: i32) -> Result<NewFact, ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let len = self.text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(ValidationError::TextTooLong(len));
        }
        if !is_http_url(&self.source) {
            return Err(ValidationError::BadSource);
        }
        let category = self.category.ok_or(ValidationError::NoCategory)?;

        Ok(NewFact {
            text: self.text.clone(),
            source: self.source.clone(),
            category,
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in,
        })
    }
}

/// A validated submission, ready for insert. Same wire casing as
/// [`crate::Fact`], minus the server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFact {
    pub text: String,
    pub source: String,
    pub category: Category,
    pub votes_interesting: u32,
    pub votes_mindblowing: u32,
    pub votes_false: u32,
    pub created_in: i32,
}

pub fn is_http_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

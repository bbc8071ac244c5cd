//! Structured query predicates for the document store.
//!
//! Handlers describe what they want as a small tagged predicate tree instead
//! of assembling store-specific query syntax inline; the store client owns
//! the translation to its query language. Field names always refer to
//! top-level document fields.

use serde_json::Value;

/// A single condition on a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Top-level field equals the given JSON value.
    Eq {
        field: String,
        value: Value,
    },
    /// Case-insensitive substring match on a string field.
    Contains {
        field: String,
        needle: String,
    },
    /// A string-array field shares at least one element with `values`.
    Intersects {
        field: String,
        values: Vec<String>,
    },
    /// At least one sub-predicate matches.
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Field equality.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive substring match.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Set intersection with a string-array field.
    pub fn intersects(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::Intersects {
            field: field.into(),
            values,
        }
    }

    /// OR of the given predicates.
    #[must_use]
    pub fn any_of(predicates: Vec<Self>) -> Self {
        Self::Any(predicates)
    }
}

/// A conjunction of predicates; the empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Predicate>,
}

impl Filter {
    /// The empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Add a clause; all clauses must match.
    pub fn push(&mut self, predicate: Predicate) {
        self.clauses.push(predicate);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.push(predicate);
        self
    }

    /// Whether the filter matches every document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses, in insertion order.
    #[must_use]
    pub fn clauses(&self) -> &[Predicate] {
        &self.clauses
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{book::BookId, person::PersonId, timestamp::Timestamp};

/// A change in who holds a book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanEvent {
    /// A person borrowed a book
    Loaned {
        /// The borrowed book
        book_id: BookId,
        /// The borrower
        person_id: PersonId,
    },
    /// A person gave a book back
    Returned {
        /// The returned book
        book_id: BookId,
        /// The former borrower
        person_id: PersonId,
    },
}

impl LoanEvent {
    /// Get the book the event is about
    #[must_use]
    pub fn book_id(&self) -> &BookId {
        match self {
            Self::Loaned { book_id, .. } | Self::Returned { book_id, .. } => book_id,
        }
    }

    /// Get the person the event is about
    #[must_use]
    pub fn person_id(&self) -> PersonId {
        match self {
            Self::Loaned { person_id, .. } | Self::Returned { person_id, .. } => *person_id,
        }
    }
}

impl fmt::Display for LoanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaned { book_id, person_id } => write!(f, "{book_id} loaned to {person_id}"),
            Self::Returned { book_id, person_id } => write!(f, "{book_id} returned by {person_id}"),
        }
    }
}

/// An entry in the loan history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoanRecord {
    /// What happened
    pub event: LoanEvent,
    /// When it happened
    pub timestamp: Timestamp,
}

impl LoanRecord {
    /// Stamp `event` with the current time
    #[must_use]
    pub fn now(event: LoanEvent) -> Self {
        Self { event, timestamp: Timestamp::now() }
    }
}

use thiserror::Error;

use crate::{book::BookId, person::PersonId};

/// Errors returned by library operations
///
/// Every operation that fails leaves books and people exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A required text field was empty
    #[error("{field} must not be empty")]
    InvalidArgument {
        /// Name of the rejected field
        field: &'static str,
    },
    /// The book is already on loan
    #[error("book {book_id} is not available")]
    BookUnavailable {
        /// The book that was requested
        book_id: BookId,
    },
    /// The book is not held by the person returning it
    #[error("book {book_id} is not borrowed by person {person_id}")]
    BookNotBorrowed {
        /// The book being returned
        book_id: BookId,
        /// The person attempting the return
        person_id: PersonId,
    },
    /// No book with this id is registered
    #[error("unknown book {0}")]
    UnknownBook(BookId),
    /// No person with this id is registered
    #[error("unknown person {0}")]
    UnknownPerson(PersonId),
    /// Settings could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Reject empty or whitespace-only required text
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(LibraryError::InvalidArgument { field });
    }
    Ok(value.to_string())
}

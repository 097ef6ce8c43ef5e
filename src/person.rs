use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::{
    book::{Book, BookId},
    error::{LibraryError, Result, require_text},
    loan_status::Borrower,
};

/// Process-wide sequence for person ids, first id is 1
static PERSON_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Identifier of a person
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct PersonId(u64);

impl PersonId {
    /// Draw the next id from the process-wide sequence
    fn next() -> Self {
        Self(PERSON_SEQUENCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Build an id from a raw value
    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The numeric value of the id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book currently held by a person, as the person sees it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BorrowedBook {
    /// Id of the held book
    pub book_id: BookId,
    /// Title of the held book
    pub title: String,
}

impl From<&Book> for BorrowedBook {
    fn from(book: &Book) -> Self {
        Self { book_id: book.id().clone(), title: book.title().to_string() }
    }
}

/// A library member who borrows and returns books
///
/// Not `Clone`, for the same reason as [`Book`].
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Person {
    /// Assigned once at construction
    id: PersonId,
    /// Given name
    first_name: String,
    /// Family name
    last_name: String,
    /// Books currently held, in borrow order
    borrowed_books: Vec<BorrowedBook>,
}

impl Person {
    /// Create a person with a fresh id and no books
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if either name is blank.
    pub fn new(first_name: &str, last_name: &str) -> Result<Self> {
        let first_name = require_text("first name", first_name)?;
        let last_name = require_text("last name", last_name)?;
        Ok(Self { id: PersonId::next(), first_name, last_name, borrowed_books: Vec::new() })
    }

    /// Get the person id
    #[must_use]
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Get the first name
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Get the last name
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name separated by a space
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Books currently held, oldest loan first
    #[must_use]
    pub fn borrowed_books(&self) -> &[BorrowedBook] {
        &self.borrowed_books
    }

    /// Whether this person currently holds the given book
    #[must_use]
    pub fn has_borrowed(&self, book_id: &BookId) -> bool {
        self.borrowed_books.iter().any(|held| &held.book_id == book_id)
    }

    /// Borrow `book`
    ///
    /// The book is marked as loaned to this person and appended to the
    /// borrowed list together, or not at all.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BookUnavailable` if the book is already on loan.
    pub fn loan(&mut self, book: &mut Book) -> Result<()> {
        book.mark_loaned(Borrower::from(&*self))?;
        self.borrowed_books.push(BorrowedBook::from(&*book));
        tracing::debug!(person = %self.id, book = %book.id(), "book loaned");
        Ok(())
    }

    /// Give `book` back
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BookNotBorrowed` unless this person holds the book.
    pub fn return_book(&mut self, book: &mut Book) -> Result<()> {
        let held_by_self = book.borrower().is_some_and(|borrower| borrower.person_id == self.id);
        let position = self.borrowed_books.iter().position(|held| &held.book_id == book.id());

        let Some(position) = position.filter(|_| held_by_self) else {
            return Err(LibraryError::BookNotBorrowed {
                book_id: book.id().clone(),
                person_id: self.id,
            });
        };

        self.borrowed_books.remove(position);
        drop(book.mark_returned());
        tracing::debug!(person = %self.id, book = %book.id(), "book returned");
        Ok(())
    }

    /// Multi-line report of the person and the books they hold
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Person information:")?;
        writeln!(f, "first name : {}", self.first_name)?;
        writeln!(f, "last name : {}", self.last_name)?;
        writeln!(f, "id : {}", self.id)?;
        for held in &self.borrowed_books {
            writeln!(f, "{} {}", held.book_id, held.title)?;
        }
        Ok(())
    }
}

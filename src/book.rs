use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{LibraryError, Result, require_text},
    loan_status::{Borrower, LoanStatus},
};

/// Process-wide sequence for book ids
static BOOK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identifier of a book, e.g. `book-0`, `book-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Draw the next id from the process-wide sequence
    fn next() -> Self {
        let n = BOOK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("book-{n}"))
    }

    /// The id as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A book in the library together with its loan status
///
/// Not `Clone`: each book exists once, so its id and loan status cannot be
/// split across copies.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Immutable identifier
    id: BookId,
    /// Book title
    title: String,
    /// Book author
    author: String,
    /// Whether the book is on the shelf or with a borrower
    status: LoanStatus,
}

impl Book {
    /// Create an available book with a fresh id
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if the title or author is blank.
    pub fn new(title: &str, author: &str) -> Result<Self> {
        let title = require_text("title", title)?;
        let author = require_text("author", author)?;
        Ok(Self { id: BookId::next(), title, author, status: LoanStatus::Available })
    }

    /// Get the book id
    #[must_use]
    pub fn id(&self) -> &BookId {
        &self.id
    }

    /// Get the title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Get the current loan status
    #[must_use]
    pub fn status(&self) -> &LoanStatus {
        &self.status
    }

    /// Whether the book can currently be loaned
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Who holds the book, if anyone
    #[must_use]
    pub fn borrower(&self) -> Option<&Borrower> {
        self.status.borrower()
    }

    /// Move the book from the shelf to `borrower` in one step
    pub(crate) fn mark_loaned(&mut self, borrower: Borrower) -> Result<()> {
        if !self.is_available() {
            return Err(LibraryError::BookUnavailable { book_id: self.id.clone() });
        }
        self.status = LoanStatus::LoanedTo(borrower);
        Ok(())
    }

    /// Put the book back on the shelf in one step, handing back the borrower
    ///
    /// Returns `None` and changes nothing if the book was not on loan.
    pub(crate) fn mark_returned(&mut self) -> Option<Borrower> {
        match std::mem::take(&mut self.status) {
            LoanStatus::LoanedTo(borrower) => Some(borrower),
            LoanStatus::Available => None,
        }
    }

    /// Multi-line report of the book and, when loaned, its borrower
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Book information:")?;
        writeln!(f, "title : {}", self.title)?;
        writeln!(f, "author : {}", self.author)?;
        if let Some(borrower) = self.borrower() {
            writeln!(f)?;
            write!(f, "{borrower}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, thread};

    use super::*;
    use crate::person::PersonId;

    fn borrower() -> Borrower {
        Borrower {
            person_id: PersonId::from_raw(11),
            first_name: "Roman".to_string(),
            last_name: "Vanoyan".to_string(),
        }
    }

    #[test]
    fn new_book_is_available() -> Result<()> {
        let book = Book::new("Dune", "Frank Herbert")?;
        assert!(book.is_available());
        assert_eq!(book.borrower(), None);
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Frank Herbert");
        assert!(book.id().as_str().starts_with("book-"));
        Ok(())
    }

    #[test]
    fn blank_metadata_is_rejected() {
        assert_eq!(Book::new("", "Someone"), Err(LibraryError::InvalidArgument { field: "title" }));
        assert_eq!(Book::new("Something", " "), Err(LibraryError::InvalidArgument { field: "author" }));
    }

    #[test]
    fn ids_are_unique() -> Result<()> {
        let first = Book::new("A", "B")?;
        let second = Book::new("A", "B")?;
        assert_ne!(first.id(), second.id());
        Ok(())
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn ids_are_unique_across_threads() {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                thread::spawn(|| {
                    (0..25)
                        .map(|_| Book::new("Shared", "Author").map(|book| book.id().clone()))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for worker in workers {
            let created = worker.join().expect("worker thread panicked").expect("valid metadata");
            ids.extend(created);
        }
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn mark_loaned_sets_both_facets() -> Result<()> {
        let mut book = Book::new("Dune", "Frank Herbert")?;
        book.mark_loaned(borrower())?;
        assert!(!book.is_available());
        assert_eq!(book.borrower(), Some(&borrower()));
        Ok(())
    }

    #[test]
    fn mark_loaned_twice_fails_without_change() -> Result<()> {
        let mut book = Book::new("Dune", "Frank Herbert")?;
        book.mark_loaned(borrower())?;
        let before = book.describe();

        let other = Borrower { person_id: PersonId::from_raw(12), ..borrower() };
        assert_eq!(
            book.mark_loaned(other),
            Err(LibraryError::BookUnavailable { book_id: book.id().clone() })
        );
        assert_eq!(book.describe(), before);
        assert_eq!(book.borrower(), Some(&borrower()));
        Ok(())
    }

    #[test]
    fn mark_returned_clears_borrower() -> Result<()> {
        let mut book = Book::new("Dune", "Frank Herbert")?;
        book.mark_loaned(borrower())?;
        assert_eq!(book.mark_returned(), Some(borrower()));
        assert!(book.is_available());
        assert_eq!(book.borrower(), None);
        assert_eq!(book.mark_returned(), None);
        assert!(book.is_available());
        Ok(())
    }

    #[test]
    fn describe_available_book() -> Result<()> {
        let book = Book::new("Dune", "Frank Herbert")?;
        assert_eq!(book.describe(), "Book information:\ntitle : Dune\nauthor : Frank Herbert\n");
        Ok(())
    }

    #[test]
    fn describe_loaned_book_appends_borrower() -> Result<()> {
        let mut book = Book::new("Dune", "Frank Herbert")?;
        book.mark_loaned(borrower())?;
        assert_eq!(
            book.describe(),
            "Book information:\ntitle : Dune\nauthor : Frank Herbert\n\n\
             Person information:\nfirst name : Roman\nlast name : Vanoyan\nid : 11\n"
        );
        Ok(())
    }
}

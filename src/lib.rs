//! In-memory lending library.
//!
//! Books and people are plain values; a loan links them through
//! [`Person::loan`] and [`Person::return_book`], which update both sides in
//! one step. [`Library`] owns a catalogue of both, addresses them by id and
//! keeps a bounded history of loans.

pub mod book;
pub mod error;
pub mod events;
pub mod library;
pub mod loan_status;
pub mod observers;
pub mod person;
pub mod settings;
pub mod timestamp;

pub use book::{Book, BookId};
pub use error::{LibraryError, Result};
pub use events::{LoanEvent, LoanRecord};
pub use library::{Library, LibrarySnapshot};
pub use loan_status::{Borrower, LoanStatus};
pub use observers::{LoanLogger, LoanObserver, NotificationService};
pub use person::{BorrowedBook, Person, PersonId};
pub use settings::LibrarySettings;

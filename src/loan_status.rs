use std::fmt;

use serde::{Deserialize, Serialize};

use crate::person::{Person, PersonId};

/// Summary of the person holding a book
///
/// A book only keeps this back-reference for lookup and reporting; it never
/// owns the person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Borrower {
    /// Id of the borrowing person
    pub person_id: PersonId,
    /// First name at the time of the loan
    pub first_name: String,
    /// Last name at the time of the loan
    pub last_name: String,
}

impl From<&Person> for Borrower {
    fn from(person: &Person) -> Self {
        Self {
            person_id: person.id(),
            first_name: person.first_name().to_string(),
            last_name: person.last_name().to_string(),
        }
    }
}

impl fmt::Display for Borrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Person information:")?;
        writeln!(f, "first name : {}", self.first_name)?;
        writeln!(f, "last name : {}", self.last_name)?;
        writeln!(f, "id : {}", self.person_id)
    }
}

/// Loan status of a book
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanStatus {
    /// Book is on the shelf
    #[default]
    Available,
    /// Book is on loan
    LoanedTo(Borrower),
}

impl LoanStatus {
    /// Whether the book can be loaned
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// The current borrower, if any
    #[must_use]
    pub fn borrower(&self) -> Option<&Borrower> {
        match self {
            Self::Available => None,
            Self::LoanedTo(borrower) => Some(borrower),
        }
    }

    /// Get a human-readable description of the current status
    #[must_use]
    pub fn get_description(&self) -> String {
        match self {
            Self::Available => "Book is available for loan".to_string(),
            Self::LoanedTo(borrower) => format!(
                "Book is loaned to {} {} ({})",
                borrower.first_name, borrower.last_name, borrower.person_id
            ),
        }
    }
}

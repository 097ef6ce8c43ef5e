use crate::{book::Book, events::LoanEvent, person::Person};

/// Trait for loan event observation
pub trait LoanObserver {
    /// Called after a loan or return has been applied to both sides
    fn on_loan_event(&self, event: &LoanEvent, book: &Book, person: &Person);
}

/// Logs every loan event
#[derive(Debug)]
pub struct LoanLogger;

impl LoanObserver for LoanLogger {
    fn on_loan_event(&self, event: &LoanEvent, book: &Book, person: &Person) {
        tracing::debug!(
            target: "lending_library::loans",
            book = %book.id(),
            person = %person.id(),
            status = %book.status().get_description(),
            "{event}"
        );
    }
}

/// Announces loans and the moment a person holds no more books
#[derive(Debug)]
pub struct NotificationService;

impl LoanObserver for NotificationService {
    fn on_loan_event(&self, event: &LoanEvent, book: &Book, person: &Person) {
        match event {
            LoanEvent::Loaned { .. } => {
                tracing::info!("{} has borrowed \"{}\"", person.full_name(), book.title());
            }
            LoanEvent::Returned { .. } if person.borrowed_books().is_empty() => {
                tracing::info!("{} has returned all books", person.full_name());
            }
            LoanEvent::Returned { .. } => {}
        }
    }
}

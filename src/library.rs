use std::fmt;

use serde::Serialize;

use crate::{
    book::{Book, BookId},
    error::{LibraryError, Result},
    events::{LoanEvent, LoanRecord},
    observers::{LoanLogger, LoanObserver, NotificationService},
    person::{Person, PersonId},
    settings::LibrarySettings,
};

/// Serializable view of everything the library holds
#[derive(Debug, Serialize)]
pub struct LibrarySnapshot<'a> {
    /// All books, in registration order
    pub books: &'a [Book],
    /// All people, in registration order
    pub people: &'a [Person],
    /// Loan history, oldest first
    pub history: &'a [LoanRecord],
}

/// Registry of books and people that runs loans between them
pub struct Library {
    /// Registered books
    books: Vec<Book>,
    /// Registered people
    people: Vec<Person>,
    /// Record of applied loans and returns
    history: Vec<LoanRecord>,
    /// Maximum number of history entries to keep
    history_limit: usize,
    /// Registered loan observers
    observers: Vec<Box<dyn LoanObserver>>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.books)
            .field("people", &self.people)
            .field("history", &self.history)
            .field("history_limit", &self.history_limit)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Library {
    /// Create an empty library with no observers
    #[must_use]
    pub fn new(settings: &LibrarySettings) -> Self {
        Self {
            books: Vec::new(),
            people: Vec::new(),
            history: Vec::new(),
            history_limit: settings.history_limit,
            observers: Vec::new(),
        }
    }

    /// Create an empty library that logs and announces every loan
    #[must_use]
    pub fn with_standard_observers(settings: &LibrarySettings) -> Self {
        let mut library = Self::new(settings);
        library.register_observer(Box::new(LoanLogger));
        library.register_observer(Box::new(NotificationService));
        library
    }

    /// Register an observer to be notified of loans and returns
    pub fn register_observer(&mut self, observer: Box<dyn LoanObserver>) {
        self.observers.push(observer);
    }

    /// Catalogue a new book
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if the title or author is blank.
    pub fn add_book(&mut self, title: &str, author: &str) -> Result<BookId> {
        let book = Book::new(title, author)?;
        let id = book.id().clone();
        tracing::debug!(book = %id, title, "book added");
        self.books.push(book);
        Ok(id)
    }

    /// Enrol a new person
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if either name is blank.
    pub fn register_person(&mut self, first_name: &str, last_name: &str) -> Result<PersonId> {
        let person = Person::new(first_name, last_name)?;
        let id = person.id();
        tracing::debug!(person = %id, first_name, last_name, "person registered");
        self.people.push(person);
        Ok(id)
    }

    /// Find a registered book
    #[must_use]
    pub fn book(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    /// Find a registered person
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|person| person.id() == id)
    }

    /// All books, in registration order
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All people, in registration order
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Books currently on the shelf
    pub fn available_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|book| book.is_available())
    }

    /// Lend a registered book to a registered person
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownPerson` or `LibraryError::UnknownBook` for
    /// unregistered ids, and `LibraryError::BookUnavailable` if the book is on loan.
    pub fn loan(&mut self, person_id: PersonId, book_id: &BookId) -> Result<()> {
        let (person, book) = self.entry_pair(person_id, book_id)?;
        person.loan(book)?;
        self.record(LoanEvent::Loaned { book_id: book_id.clone(), person_id });
        Ok(())
    }

    /// Take a book back from the person holding it
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownPerson` or `LibraryError::UnknownBook` for
    /// unregistered ids, and `LibraryError::BookNotBorrowed` if the person does
    /// not hold the book.
    pub fn return_book(&mut self, person_id: PersonId, book_id: &BookId) -> Result<()> {
        let (person, book) = self.entry_pair(person_id, book_id)?;
        person.return_book(book)?;
        self.record(LoanEvent::Returned { book_id: book_id.clone(), person_id });
        Ok(())
    }

    /// Get the loan history, oldest first
    #[must_use]
    pub fn history(&self) -> &[LoanRecord] {
        &self.history
    }

    /// Borrow everything the library holds for serialization
    #[must_use]
    pub fn snapshot(&self) -> LibrarySnapshot<'_> {
        LibrarySnapshot { books: &self.books, people: &self.people, history: &self.history }
    }

    /// Resolve both ids to mutable entries
    fn entry_pair(
        &mut self,
        person_id: PersonId,
        book_id: &BookId,
    ) -> Result<(&mut Person, &mut Book)> {
        let person = self
            .people
            .iter_mut()
            .find(|person| person.id() == person_id)
            .ok_or(LibraryError::UnknownPerson(person_id))?;
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id() == book_id)
            .ok_or_else(|| LibraryError::UnknownBook(book_id.clone()))?;
        Ok((person, book))
    }

    /// Notify observers and append to the bounded history
    fn record(&mut self, event: LoanEvent) {
        if let (Some(book), Some(person)) = (self.book(event.book_id()), self.person(event.person_id())) {
            for observer in &self.observers {
                observer.on_loan_event(&event, book, person);
            }
        }

        self.history.push(LoanRecord::now(event));
        if self.history.len() > self.history_limit {
            self.history.remove(0);
        }
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new(&LibrarySettings::default())
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_loan = self.books.iter().filter(|book| !book.is_available()).count();
        write!(
            f,
            "{} books ({on_loan} on loan), {} people",
            self.books.len(),
            self.people.len()
        )
    }
}

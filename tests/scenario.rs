use lending_library::{Book, LibraryError, Person, Result};

/// Callable without naming the marker only while `T` is not `Clone`
trait NotClone<Marker> {
    fn check() {}
}

impl<T: ?Sized> NotClone<()> for T {}

// A `Clone` type also matches this impl, making `NotClone<_>` ambiguous.
impl<T: ?Sized + Clone> NotClone<u8> for T {}

// A second copy of a book or person would carry the same id and could be
// loaned or returned independently of the original.
#[test]
fn books_and_people_cannot_be_copied() {
    <Book as NotClone<_>>::check();
    <Person as NotClone<_>>::check();
}

// Loan and return of the demo book, checking the reports at every step.
#[test]
fn demo_scenario_round_trip() -> Result<()> {
    let mut book = Book::new("Java programming for dummies", "Vivek Chandra")?;
    let mut person = Person::new("Roman", "Vanoyan")?;
    let person_block = format!(
        "Person information:\nfirst name : Roman\nlast name : Vanoyan\nid : {}\n",
        person.id()
    );
    let book_block = "Book information:\ntitle : Java programming for dummies\nauthor : Vivek Chandra\n";

    assert!(book.is_available());
    assert_eq!(book.describe(), book_block);
    assert_eq!(person.describe(), person_block);

    person.loan(&mut book)?;
    assert!(!book.is_available());
    assert_eq!(book.borrower().map(|b| b.person_id), Some(person.id()));
    assert_eq!(
        person.describe(),
        format!("{person_block}{} Java programming for dummies\n", book.id())
    );
    assert_eq!(book.describe(), format!("{book_block}\n{person_block}"));

    person.return_book(&mut book)?;
    assert!(book.is_available());
    assert_eq!(book.borrower(), None);
    assert!(person.borrowed_books().is_empty());
    assert_eq!(book.describe(), book_block);
    assert_eq!(person.describe(), person_block);
    Ok(())
}

#[test]
fn failed_operations_leave_state_untouched() -> Result<()> {
    let mut book = Book::new("Java programming for dummies", "Vivek Chandra")?;
    let mut holder = Person::new("Roman", "Vanoyan")?;
    let mut other = Person::new("Vivek", "Chandra")?;

    assert!(matches!(holder.return_book(&mut book), Err(LibraryError::BookNotBorrowed { .. })));
    assert!(book.is_available());

    holder.loan(&mut book)?;
    let (book_before, holder_before, other_before) =
        (book.describe(), holder.describe(), other.describe());

    assert!(matches!(other.loan(&mut book), Err(LibraryError::BookUnavailable { .. })));
    assert!(matches!(holder.loan(&mut book), Err(LibraryError::BookUnavailable { .. })));
    assert!(matches!(other.return_book(&mut book), Err(LibraryError::BookNotBorrowed { .. })));

    assert_eq!(book.describe(), book_before);
    assert_eq!(holder.describe(), holder_before);
    assert_eq!(other.describe(), other_before);
    assert_eq!(book.borrower().map(|b| b.person_id), Some(holder.id()));
    assert!(holder.has_borrowed(book.id()));
    Ok(())
}

#[test]
fn many_people_get_distinct_ids() -> Result<()> {
    let people = (0..50).map(|_| Person::new("Same", "Name")).collect::<Result<Vec<_>>>()?;
    let mut ids: Vec<u64> = people.iter().map(|p| p.id().get()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
    Ok(())
}

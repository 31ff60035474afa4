use crate::models::{BookGroup, ClippingRecord};
use std::collections::HashMap;

/// Groups records by their raw `(title, author)` pair.
///
/// Books come out in order of first appearance and each book keeps its
/// records in input order. Repeated clippings are kept as they are.
pub fn group_by_book(records: impl IntoIterator<Item = ClippingRecord>) -> Vec<BookGroup> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut books: Vec<BookGroup> = Vec::new();

    for record in records {
        let key = (record.title.clone(), record.author.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            books.push(BookGroup {
                title: record.title.clone(),
                author: record.author.clone(),
                records: Vec::new(),
            });
            books.len() - 1
        });
        books[slot].records.push(record);
    }

    books
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClippingKind;

    fn make_record(title: &str, author: &str, body: &str) -> ClippingRecord {
        ClippingRecord {
            title: title.to_string(),
            author: author.to_string(),
            kind: ClippingKind::Highlight,
            page: None,
            location: None,
            added: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_same_book_grouped_in_input_order() {
        let records = vec![
            make_record("Foo", "Bar", "first"),
            make_record("Foo", "Bar", "second"),
        ];

        let books = group_by_book(records);

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Foo");
        assert_eq!(books[0].author, "Bar");
        let bodies: Vec<&str> = books[0].records.iter().map(|r| r.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }

    #[test]
    fn test_books_ordered_by_first_occurrence() {
        let records = vec![
            make_record("B", "x", "1"),
            make_record("A", "x", "2"),
            make_record("B", "x", "3"),
        ];

        let books = group_by_book(records);

        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
        assert_eq!(books[0].records.len(), 2);
        assert_eq!(books[0].records[1].body, "3");
    }

    #[test]
    fn test_key_is_exact_and_case_sensitive() {
        let records = vec![
            make_record("Foo", "Bar", "1"),
            make_record("foo", "Bar", "2"),
            make_record("Foo", "", "3"),
        ];

        let books = group_by_book(records);

        assert_eq!(books.len(), 3);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let records = vec![
            make_record("Foo", "Bar", "same"),
            make_record("Foo", "Bar", "same"),
        ];

        let books = group_by_book(records);

        assert_eq!(books[0].records.len(), 2);
    }

    #[test]
    fn test_no_records_no_books() {
        assert!(group_by_book(Vec::new()).is_empty());
    }
}

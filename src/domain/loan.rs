use chrono::{DateTime, Utc};

use super::{Book, BookBorrowed, BookReturned, BorrowBookError, ReturnBookError, User};

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 在庫が1冊以上あること
/// - 利用者が同じ書籍をまだ借りていないこと
/// - 貸出時：利用者の貸出中集合に追加し、在庫をちょうど1冊減らす
///
/// 副作用なし。拒否された場合、引数の集約は変更されない。
/// 新しい(User, Book)とイベントを返す。
pub fn borrow_book(
    user: &User,
    book: &Book,
    borrowed_at: DateTime<Utc>,
) -> Result<(User, Book, BookBorrowed), BorrowBookError> {
    if !book.in_stock() {
        return Err(BorrowBookError::InsufficientStock);
    }

    if user.borrowed_books.contains(book.id) {
        return Err(BorrowBookError::AlreadyBorrowed);
    }

    let mut borrowed_books = user.borrowed_books.clone();
    borrowed_books.insert(book.id);

    let new_user = User {
        borrowed_books,
        updated_at: Some(borrowed_at),
        ..user.clone()
    };

    let new_book = Book {
        quantity: book.quantity - 1,
        updated_at: Some(borrowed_at),
        ..book.clone()
    };

    let event = BookBorrowed {
        user_id: user.id,
        book_id: book.id,
        quantity_available: new_book.quantity,
        occurred_at: borrowed_at,
    };

    Ok((new_user, new_book, event))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 利用者がその書籍を借りていること
/// - 返却時：貸出中集合から取り除き、在庫をちょうど1冊戻す
/// - 在庫数がi32の上限に達している場合はStockOverflow
///
/// 副作用なし。新しい(User, Book)とイベントを返す。
pub fn return_book(
    user: &User,
    book: &Book,
    returned_at: DateTime<Utc>,
) -> Result<(User, Book, BookReturned), ReturnBookError> {
    if !user.borrowed_books.contains(book.id) {
        return Err(ReturnBookError::NeverBorrowed);
    }

    let quantity = book
        .quantity
        .checked_add(1)
        .ok_or(ReturnBookError::StockOverflow)?;

    let mut borrowed_books = user.borrowed_books.clone();
    borrowed_books.remove(book.id);

    let new_user = User {
        borrowed_books,
        updated_at: Some(returned_at),
        ..user.clone()
    };

    let new_book = Book {
        quantity,
        updated_at: Some(returned_at),
        ..book.clone()
    };

    let event = BookReturned {
        user_id: user.id,
        book_id: book.id,
        quantity_available: new_book.quantity,
        occurred_at: returned_at,
    };

    Ok((new_user, new_book, event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, BorrowedBooks, UserId};
    use chrono::NaiveDate;

    fn user_with(books: &[i64]) -> User {
        User {
            id: UserId::new(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10),
            location: "London".to_string(),
            phone: "555-0100".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            borrowed_books: books.iter().map(|id| BookId::new(*id)).collect(),
            version: 2,
            created_at: None,
            updated_at: None,
        }
    }

    fn book_with(id: i64, quantity: i32) -> Book {
        Book {
            id: BookId::new(id),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            pages: 412,
            quantity,
            version: 7,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_borrow_book_success() {
        let now = Utc::now();
        let user = user_with(&[]);
        let book = book_with(3, 5);

        let (user, book, event) = borrow_book(&user, &book, now).unwrap();

        assert_eq!(user.borrowed_books.iter().collect::<Vec<_>>(), vec![BookId::new(3)]);
        assert_eq!(book.quantity, 4);
        assert_eq!(event.quantity_available, 4);
        assert_eq!(event.user_id, UserId::new(1));
        assert_eq!(user.updated_at, Some(now));
        assert_eq!(book.updated_at, Some(now));
    }

    #[test]
    fn test_borrow_book_keeps_versions() {
        let (user, book, _) = borrow_book(&user_with(&[]), &book_with(3, 5), Utc::now()).unwrap();
        assert_eq!(user.version, 2);
        assert_eq!(book.version, 7);
    }

    #[test]
    fn test_borrow_book_fails_when_out_of_stock() {
        let result = borrow_book(&user_with(&[]), &book_with(4, 0), Utc::now());
        assert_eq!(result.unwrap_err(), BorrowBookError::InsufficientStock);
    }

    #[test]
    fn test_borrow_book_fails_when_already_borrowed() {
        let user = user_with(&[5]);
        let result = borrow_book(&user, &book_with(5, 14), Utc::now());
        assert_eq!(result.unwrap_err(), BorrowBookError::AlreadyBorrowed);
        assert_eq!(user.borrowed_books.len(), 1);
    }

    #[test]
    fn test_borrow_book_stock_is_checked_before_duplicates() {
        let result = borrow_book(&user_with(&[5]), &book_with(5, 0), Utc::now());
        assert_eq!(result.unwrap_err(), BorrowBookError::InsufficientStock);
    }

    #[test]
    fn test_return_book_success() {
        let (user, book, event) =
            return_book(&user_with(&[3]), &book_with(3, 5), Utc::now()).unwrap();

        assert_eq!(user.borrowed_books, BorrowedBooks::new());
        assert_eq!(book.quantity, 6);
        assert_eq!(event.quantity_available, 6);
    }

    #[test]
    fn test_return_book_fails_when_never_borrowed() {
        let result = return_book(&user_with(&[]), &book_with(5, 14), Utc::now());
        assert_eq!(result.unwrap_err(), ReturnBookError::NeverBorrowed);
    }

    #[test]
    fn test_return_book_fails_when_quantity_is_at_maximum() {
        let user = user_with(&[3]);
        let result = return_book(&user, &book_with(3, i32::MAX), Utc::now());
        assert_eq!(result.unwrap_err(), ReturnBookError::StockOverflow);
        assert!(user.borrowed_books.contains(BookId::new(3)));
    }

    #[test]
    fn test_return_book_leaves_other_loans_untouched() {
        let (user, _, _) = return_book(&user_with(&[3, 8]), &book_with(3, 1), Utc::now()).unwrap();
        assert_eq!(user.borrowed_books.iter().collect::<Vec<_>>(), vec![BookId::new(8)]);
    }
}

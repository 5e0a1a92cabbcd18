use crate::application::{
    ServiceDependencies,
    book::{self, BookApplicationError},
    user::{self, UserApplicationError},
};
use crate::domain::{self, Book, BookBorrowed, BookId, BookReturned, User, UserId};
use crate::ports::CommitOutcome;
use chrono::Utc;

use super::errors::{LoanApplicationError, Result};

/// 利用者と書籍を読み込むヘルパー関数
///
/// borrow_book, return_bookで共通利用される。
/// 利用者を先に読み込むため、利用者が存在しない場合は書籍リポジトリを呼び出さない。
///
/// # エラー
/// - UserNotFound / BookNotFound: 該当する集約が存在しない
/// - UserRepositoryError / BookRepositoryError: 読み込み失敗（そのまま伝播）
async fn load_pair(
    deps: &ServiceDependencies,
    user_id: UserId,
    book_id: BookId,
) -> Result<(User, Book)> {
    let user = user::get_user(deps, user_id)
        .await
        .map_err(|e| match e {
            UserApplicationError::NotFound => LoanApplicationError::UserNotFound,
            UserApplicationError::RepositoryError(e) => LoanApplicationError::UserRepositoryError(e),
            other => LoanApplicationError::UserRepositoryError(Box::new(other)),
        })?;

    let book = book::get_book(deps, book_id)
        .await
        .map_err(|e| match e {
            BookApplicationError::NotFound => LoanApplicationError::BookNotFound,
            BookApplicationError::RepositoryError(e) => LoanApplicationError::BookRepositoryError(e),
            other => LoanApplicationError::BookRepositoryError(Box::new(other)),
        })?;

    Ok((user, book))
}

/// 変更後の利用者と書籍を1つの単位で保存するヘルパー関数
///
/// 読み込み後に他の処理がどちらかを更新していた場合は何も書き込まず、
/// ConcurrentModificationを返す（再試行は呼び出し側の判断）。
async fn commit(deps: &ServiceDependencies, user: &User, book: &Book) -> Result<()> {
    let outcome = deps
        .loan_store
        .commit(user, book)
        .await
        .map_err(LoanApplicationError::LoanStoreError)?;

    match outcome {
        CommitOutcome::Committed => Ok(()),
        CommitOutcome::Stale => Err(LoanApplicationError::ConcurrentModification),
    }
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 利用者と書籍が存在すること
/// - 在庫が1冊以上あること
/// - 利用者がその書籍をまだ借りていないこと
///
/// 成功時は利用者の貸出中集合に書籍IDを追加し、在庫を1冊減らす。
/// 拒否された場合はどちらの集約も変更されない。
///
/// # 一貫性保証
///
/// 利用者と書籍の書き込みはLoanStoreの1回のcommitで原子的に行われる。
/// 読み込みからcommitまでの間に競合する書き込みがあった場合は
/// ConcurrentModificationで失敗し、在庫が負になることはない。
///
/// # 冪等性
///
/// 冪等ではない。同じ(利用者, 書籍)で2回呼ぶと2回目はAlreadyBorrowedになる。
pub async fn borrow_book(
    deps: &ServiceDependencies,
    user_id: UserId,
    book_id: BookId,
) -> Result<BookBorrowed> {
    // 1. 利用者・書籍の読み込み
    let (user, book) = load_pair(deps, user_id, book_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let (user, book, event) = domain::loan::borrow_book(&user, &book, Utc::now())?;

    // 3. 利用者 → 書籍の順に1つの単位で保存
    commit(deps, &user, &book).await?;

    Ok(event)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 利用者と書籍が存在すること
/// - 利用者がその書籍を借りていること
///
/// 成功時は貸出中集合から書籍IDを取り除き、在庫を1冊戻す。
///
/// # 一貫性保証
///
/// `borrow_book()`と同じ。
pub async fn return_book(
    deps: &ServiceDependencies,
    user_id: UserId,
    book_id: BookId,
) -> Result<BookReturned> {
    let (user, book) = load_pair(deps, user_id, book_id).await?;

    let (user, book, event) = domain::loan::return_book(&user, &book, Utc::now())?;

    commit(deps, &user, &book).await?;

    Ok(event)
}

use crate::application::ServiceDependencies;
use crate::domain::{BorrowedBooks, User, UserId};
use chrono::Utc;

use super::errors::{Result, UserApplicationError};

async fn load_user(deps: &ServiceDependencies, user_id: UserId) -> Result<User> {
    deps.user_repository
        .get_by_id(user_id)
        .await
        .map_err(UserApplicationError::RepositoryError)?
        .ok_or(UserApplicationError::NotFound)
}

/// 利用者を登録する
///
/// ビジネスルール：
/// - 同じIDの利用者が存在しないこと
/// - ID・氏名・生年月日・所在地・電話番号・メールアドレス・パスワードがそろっていること
///
/// 貸出中集合は貸出調整だけが変更するため、入力に含まれていても空で登録する。
pub async fn create_user(deps: &ServiceDependencies, user: User) -> Result<User> {
    let existing = deps
        .user_repository
        .get_by_id(user.id)
        .await
        .map_err(UserApplicationError::RepositoryError)?;

    if existing.is_some() {
        return Err(UserApplicationError::Conflict);
    }

    user.validate()?;

    let user = User {
        borrowed_books: BorrowedBooks::new(),
        version: 0,
        created_at: Some(Utc::now()),
        updated_at: None,
        ..user
    };

    deps.user_repository
        .create(&user)
        .await
        .map_err(UserApplicationError::RepositoryError)?;

    Ok(user)
}

/// IDで利用者を取得する（貸出中集合を含む）
pub async fn get_user(deps: &ServiceDependencies, user_id: UserId) -> Result<User> {
    load_user(deps, user_id).await
}

pub async fn get_all_users(deps: &ServiceDependencies) -> Result<Vec<User>> {
    deps.user_repository
        .get_all()
        .await
        .map_err(UserApplicationError::RepositoryError)
}

/// 利用者のプロフィールを更新する
///
/// 貸出中集合は保存済みのものを引き継ぐ（入力値は無視する）。
pub async fn update_user(deps: &ServiceDependencies, user: User) -> Result<User> {
    let existing = load_user(deps, user.id).await?;

    user.validate()?;

    let user = User {
        borrowed_books: existing.borrowed_books,
        version: existing.version + 1,
        created_at: existing.created_at,
        updated_at: Some(Utc::now()),
        ..user
    };

    deps.user_repository
        .update(&user)
        .await
        .map_err(UserApplicationError::RepositoryError)?;

    Ok(user)
}

/// 利用者を削除する
pub async fn delete_user(deps: &ServiceDependencies, user_id: UserId) -> Result<()> {
    load_user(deps, user_id).await?;

    deps.user_repository
        .delete(user_id)
        .await
        .map_err(UserApplicationError::RepositoryError)
}

//! In-app notifications.

use chrono::Utc;

use super::crud;
use super::error::ServiceResult;
use crate::db::repository::FullRepository;
use crate::models::{unsaved, Notification, NotificationId, NotificationKind, User, UserId};

/// Queue a notification for one user.
pub async fn notify<R>(
    repo: &R,
    user_id: UserId,
    kind: NotificationKind,
    title: impl Into<String>,
    message: impl Into<String>,
) -> ServiceResult<Notification>
where
    R: FullRepository + ?Sized,
{
    let notification = Notification {
        id: unsaved(),
        user_id,
        title: title.into(),
        message: message.into(),
        kind,
        is_read: false,
        created_at: Utc::now(),
        read_at: None,
    };
    crud::create(repo, notification).await
}

/// Newest first.
pub async fn list_for_user<R>(
    repo: &R,
    user_id: UserId,
    unread_only: bool,
) -> ServiceResult<Vec<Notification>>
where
    R: FullRepository + ?Sized,
{
    crud::ensure_exists::<User, R>(repo, user_id).await?;
    let items = if unread_only {
        repo.get_unread_notifications_by_user_id(user_id).await?
    } else {
        repo.get_notifications_by_user_id(user_id).await?
    };
    Ok(items)
}

pub async fn mark_read<R>(repo: &R, id: NotificationId) -> ServiceResult<Notification>
where
    R: FullRepository + ?Sized,
{
    let now = Utc::now();
    crud::modify(repo, id, move |n: &mut Notification| n.mark_read(now)).await
}

/// Returns how many notifications changed.
pub async fn mark_all_read<R>(repo: &R, user_id: UserId) -> ServiceResult<usize>
where
    R: FullRepository + ?Sized,
{
    let unread = list_for_user(repo, user_id, true).await?;
    let now = Utc::now();
    let count = unread.len();
    for mut notification in unread {
        notification.mark_read(now);
        crud::update(repo, notification).await?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::services::users::{register, Registration};

    async fn user(repo: &LocalRepository) -> UserId {
        let (user, _) = register(
            repo,
            Registration {
                email: "ada@example.org".to_string(),
                password: "analytical".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                phone: None,
            },
            4,
        )
        .await
        .unwrap();
        user.id
    }

    #[tokio::test]
    async fn test_unread_filter_and_mark_all() {
        let repo = LocalRepository::with_reference_data();
        let uid = user(&repo).await;
        let first = notify(&repo, uid, NotificationKind::System, "Welcome", "Hello")
            .await
            .unwrap();
        notify(&repo, uid, NotificationKind::Reminder, "Reminder", "Tomorrow 9:00")
            .await
            .unwrap();

        mark_read(&repo, first.id).await.unwrap();
        assert_eq!(list_for_user(&repo, uid, true).await.unwrap().len(), 1);
        assert_eq!(list_for_user(&repo, uid, false).await.unwrap().len(), 2);

        assert_eq!(mark_all_read(&repo, uid).await.unwrap(), 1);
        assert!(list_for_user(&repo, uid, true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_read_sets_timestamp() {
        let repo = LocalRepository::with_reference_data();
        let uid = user(&repo).await;
        let n = notify(&repo, uid, NotificationKind::System, "Hi", "There")
            .await
            .unwrap();
        let read = mark_read(&repo, n.id).await.unwrap();
        assert!(read.is_read);
        assert!(read.read_at.is_some());
    }
}

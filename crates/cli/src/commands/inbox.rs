//! Inbox commands: admin messages and notifications.

use marigold_core::NotificationId;
use marigold_storefront::api::ApiClient;
use marigold_storefront::inbox::{
    MessagesView, NotificationsState, NotificationsView, SIGN_IN_WARNING, SyncState, ViewState,
};
use marigold_storefront::session::Session;

/// List admin messages.
pub async fn messages(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = MessagesView::new();
    view.refresh(api).await;

    match view.state() {
        ViewState::Loading => println!("Still loading."),
        ViewState::Failed(message) => println!("Could not load messages: {message}"),
        ViewState::Empty => println!("No messages."),
        ViewState::Loaded(messages) => {
            for m in messages {
                let sender = m.sender.as_deref().unwrap_or("admin");
                println!("[{}] {} - {}", m.created_at.format("%-d %b %Y"), sender, m.message);
            }
        }
    }
    Ok(())
}

/// List notifications for the signed-in shopper.
pub async fn notifications(
    api: &ApiClient,
    session: &Session,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = NotificationsView::new();
    view.refresh(api, session).await;
    print_notifications(&view);
    Ok(())
}

/// Mark one notification read.
pub async fn mark_read(
    api: &ApiClient,
    session: &Session,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = NotificationsView::new();
    view.refresh(api, session).await;

    if matches!(view.state(), NotificationsState::SignedOut) {
        println!("{SIGN_IN_WARNING}");
        return Ok(());
    }

    view.mark_read(api, &NotificationId::new(id)).await?;
    print_notifications(&view);
    Ok(())
}

fn print_notifications(view: &NotificationsView) {
    match view.state() {
        NotificationsState::Loading => println!("Still loading."),
        NotificationsState::SignedOut => println!("{SIGN_IN_WARNING}"),
        NotificationsState::Failed(message) => println!("Could not load notifications: {message}"),
        NotificationsState::Empty => println!("No notifications."),
        NotificationsState::Loaded(rows) => {
            for row in rows {
                let read = if row.notification.read { "read" } else { "unread" };
                let sync = match row.sync {
                    SyncState::Clean => "",
                    SyncState::Failed => " [sync failed]",
                };
                println!(
                    "[{}] ({read}{sync}) {}",
                    row.notification.id, row.notification.content
                );
            }
        }
    }
}

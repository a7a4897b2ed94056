//! Admin messages and user notifications.
//!
//! Both views fetch on mount and render distinct loading / error / empty
//! states. Notifications additionally require a bearer token before any
//! network call goes out; an anonymous session short-circuits into a
//! sign-in warning.
//!
//! Mark-as-read is optimistic: the local shadow copy flips `read` before the
//! backend answers. A failed call is not rolled back; instead the row is
//! tagged with a sync-failed indicator and reconciled by the next full
//! fetch.

use chrono::{DateTime, Utc};
use marigold_core::{MessageId, NotificationId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{ApiClient, ApiError, DataEnvelope, Endpoint, Result};
use crate::session::Session;

/// Warning shown instead of fetching notifications anonymously.
pub const SIGN_IN_WARNING: &str = "Sign in to see your notifications";

/// An admin broadcast message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub message: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A per-user notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Whether a row's optimistic update reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Clean,
    /// The local update was applied but the server call failed; the next
    /// full fetch reconciles.
    Failed,
}

/// A notification plus its local sync indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRow {
    pub notification: Notification,
    pub sync: SyncState,
}

/// Fetch-on-mount lifecycle shared by the message view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Failed(String),
    Empty,
    Loaded(T),
}

/// Notification view lifecycle; adds the signed-out short-circuit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NotificationsState {
    #[default]
    Loading,
    /// No token in the session; [`SIGN_IN_WARNING`] is shown, nothing fetched.
    SignedOut,
    Failed(String),
    Empty,
    Loaded(Vec<NotificationRow>),
}

/// Backend operations the inbox views need.
#[allow(async_fn_in_trait)]
pub trait InboxApi {
    async fn fetch_messages(&self) -> Result<Vec<Message>>;
    async fn fetch_notifications(&self) -> Result<Vec<Notification>>;
    async fn mark_notification_read(&self, id: &NotificationId) -> Result<()>;
}

impl InboxApi for ApiClient {
    async fn fetch_messages(&self) -> Result<Vec<Message>> {
        let envelope: DataEnvelope<Vec<Message>> = self.get_json(Endpoint::Messages).await?;
        Ok(envelope.data)
    }

    async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        let envelope: DataEnvelope<Vec<Notification>> =
            self.get_json(Endpoint::Notifications).await?;
        Ok(envelope.data)
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<()> {
        self.patch(Endpoint::NotificationRead(id)).await
    }
}

/// View controller for the admin messages page.
#[derive(Debug, Default)]
pub struct MessagesView {
    state: ViewState<Vec<Message>>,
}

impl MessagesView {
    /// Create the view in its loading state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState<Vec<Message>> {
        &self.state
    }

    /// Fetch messages, landing in `Loaded`, `Empty`, or `Failed`.
    pub async fn refresh<A: InboxApi>(&mut self, api: &A) {
        self.state = match api.fetch_messages().await {
            Ok(messages) if messages.is_empty() => ViewState::Empty,
            Ok(messages) => ViewState::Loaded(messages),
            Err(e) => {
                warn!(error = %e.message(), "message fetch failed");
                ViewState::Failed(e.message())
            }
        };
    }
}

/// View controller for the notifications page.
#[derive(Debug, Default)]
pub struct NotificationsView {
    state: NotificationsState,
}

impl NotificationsView {
    /// Create the view in its loading state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &NotificationsState {
        &self.state
    }

    /// Fetch notifications for the session.
    ///
    /// A session without a token short-circuits into `SignedOut` without
    /// issuing any network call.
    pub async fn refresh<A: InboxApi>(&mut self, api: &A, session: &Session) {
        if !session.has_token() {
            self.state = NotificationsState::SignedOut;
            return;
        }

        self.state = match api.fetch_notifications().await {
            Ok(notifications) if notifications.is_empty() => NotificationsState::Empty,
            Ok(notifications) => NotificationsState::Loaded(
                notifications
                    .into_iter()
                    .map(|notification| NotificationRow {
                        notification,
                        sync: SyncState::Clean,
                    })
                    .collect(),
            ),
            Err(e) => {
                warn!(error = %e.message(), "notification fetch failed");
                NotificationsState::Failed(e.message())
            }
        };
    }

    /// Mark one notification read.
    ///
    /// The local copy flips to read immediately. A failed backend call
    /// leaves the optimistic flip in place and tags the row
    /// [`SyncState::Failed`] instead of rolling back.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error when the backend call failed.
    pub async fn mark_read<A: InboxApi>(
        &mut self,
        api: &A,
        id: &NotificationId,
    ) -> std::result::Result<(), ApiError> {
        let NotificationsState::Loaded(rows) = &mut self.state else {
            return Ok(());
        };
        let Some(row) = rows.iter_mut().find(|r| &r.notification.id == id) else {
            return Ok(());
        };

        // Optimistic: flip before the network answers
        row.notification.read = true;
        row.sync = SyncState::Clean;

        if let Err(e) = api.mark_notification_read(id).await {
            warn!(notification_id = %id, error = %e.message(), "mark-as-read failed");
            if let NotificationsState::Loaded(rows) = &mut self.state
                && let Some(row) = rows.iter_mut().find(|r| &r.notification.id == id)
            {
                row.sync = SyncState::Failed;
            }
            return Err(e);
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::Submission;

/// Notification channel raised by the `form_submissions` triggers.
pub const CHANNEL: &str = "form_submissions_changes";

const FEED_BUFFER: usize = 256;

/// A change pushed from the store. The wire shape matches the trigger
/// payload: `{"eventType": "...", "new": {...}, "old": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "UPPERCASE")]
pub enum ChangeEvent {
    Insert { new: Submission },
    Update { new: Submission },
    Delete { old: DeletedRow },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedRow {
    pub id: Uuid,
}

pub fn channel() -> broadcast::Sender<ChangeEvent> {
    broadcast::channel(FEED_BUFFER).0
}

/// Start the listener task bridging Postgres notifications onto the
/// broadcast channel. Malformed payloads are logged and skipped;
/// connection loss is retried by `PgListener` on the next receive.
pub fn spawn_listener(
    pool: PgPool,
    tx: broadcast::Sender<ChangeEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(listen(pool, tx))
}

async fn listen(pool: PgPool, tx: broadcast::Sender<ChangeEvent>) {
    let mut listener = match PgListener::connect_with(&pool).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Change feed listener failed to connect: {e}");
            return;
        }
    };

    if let Err(e) = listener.listen(CHANNEL).await {
        tracing::error!("Change feed listener failed to subscribe: {e}");
        return;
    }

    tracing::info!("Listening for changes on {CHANNEL}");

    loop {
        match listener.recv().await {
            Ok(notification) => {
                match serde_json::from_str::<ChangeEvent>(notification.payload()) {
                    Ok(event) => {
                        // Send only fails with zero receivers; that's fine.
                        let _ = tx.send(event);
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring malformed change feed payload: {e}");
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Change feed connection lost, reconnecting: {e}");
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        }
    }
}

pub mod cache;
pub mod filter;
pub mod map;
pub mod sort;

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::{broadcast, watch};

use crate::db;
use crate::feed::ChangeEvent;
use crate::models::Submission;

use self::cache::SubmissionCache;

/// A point-in-time view of the dashboard state. `loaded` is false only
/// while the initial bulk read is still pending.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub loaded: bool,
    pub submissions: Arc<Vec<Submission>>,
}

/// Read handle onto the state-owning task. Cheap to clone; snapshots
/// never block the task.
#[derive(Debug, Clone)]
pub struct Dashboard {
    rx: watch::Receiver<Snapshot>,
}

impl Dashboard {
    pub fn snapshot(&self) -> Snapshot {
        self.rx.borrow().clone()
    }
}

/// Start the dashboard task: one bulk read of all submissions (newest
/// first), then subscribe to the change feed and patch the list per
/// event. All mutation happens inside this task.
pub fn spawn(pool: PgPool, feed: broadcast::Sender<ChangeEvent>) -> Dashboard {
    let (tx, rx) = watch::channel(Snapshot {
        loaded: false,
        submissions: Arc::new(Vec::new()),
    });
    tokio::spawn(run(pool, feed, tx));
    Dashboard { rx }
}

async fn run(
    pool: PgPool,
    feed: broadcast::Sender<ChangeEvent>,
    tx: watch::Sender<Snapshot>,
) {
    let mut cache = SubmissionCache::new();

    match db::submissions::list_all(&pool).await {
        Ok(submissions) => {
            tracing::info!("Dashboard hydrated with {} submissions", submissions.len());
            cache.load(submissions);
        }
        Err(e) => {
            // Same degradation as a failed initial fetch in the UI:
            // log it and present an empty list.
            tracing::error!("Initial submission fetch failed: {e}");
        }
    }
    publish(&tx, &cache);

    // Subscribing after the bulk read leaves a window where events are
    // missed and never recovered; that gap is accepted.
    let mut rx = feed.subscribe();
    loop {
        match rx.recv().await {
            Ok(event) => {
                cache.apply(event);
                publish(&tx, &cache);
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!("Dashboard feed lagged, skipped {skipped} events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn publish(tx: &watch::Sender<Snapshot>, cache: &SubmissionCache) {
    tx.send_replace(Snapshot {
        loaded: true,
        submissions: Arc::new(cache.items().to_vec()),
    });
}

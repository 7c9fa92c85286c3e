use std::{collections::HashMap, sync::Arc};

use futures::{channel::mpsc, StreamExt};
use mantic_api::{Comment, CommentQuery, Store, Uuid};
use tokio::sync::RwLock;

/// Invoked with the full, freshly-ordered result set of the watched query.
pub type SnapshotFn = Box<dyn FnMut(Vec<Comment>) + Send>;

/// Fan-out from the comment write path to active subscriptions. Each watcher
/// holds a query value and a refresh channel; a matching write wakes the
/// watcher's task, which re-runs the query and hands the snapshot to the
/// caller's function.
#[derive(Clone)]
pub struct CommentFeeds(Arc<RwLock<HashMap<Uuid, Watcher>>>);

struct Watcher {
    query: CommentQuery,
    // Note: if this were bounded, a stalled watcher task could block the
    // write path while notify holds the read lock
    refresh: mpsc::UnboundedSender<()>,
}

/// Subscription handle. Delivery continues until `unsubscribe` is invoked;
/// dropping the handle without calling it leaks the watcher.
pub struct Subscription {
    id: Uuid,
    feeds: CommentFeeds,
}

impl Subscription {
    pub async fn unsubscribe(self) {
        self.feeds.0.write().await.remove(&self.id);
    }
}

impl CommentFeeds {
    pub fn new() -> CommentFeeds {
        CommentFeeds(Arc::new(RwLock::new(HashMap::new())))
    }

    /// Register a watcher for `query`: one snapshot is delivered immediately,
    /// then a new one after every notified write matching the query. A failed
    /// refresh is logged and that snapshot skipped; the watcher stays
    /// registered.
    pub async fn watch(
        &self,
        store: Arc<dyn Store>,
        query: CommentQuery,
        mut on_snapshot: SnapshotFn,
    ) -> Subscription {
        let (sender, mut receiver) = mpsc::unbounded();
        let watcher_id = Uuid::new_v4();

        // TODO: limit to some reasonable number of watchers, to avoid starvation
        self.0.write().await.insert(
            watcher_id,
            Watcher {
                query: query.clone(),
                refresh: sender,
            },
        );

        let this = self.clone();
        tokio::spawn(async move {
            loop {
                match store.list_comments(&query).await {
                    Ok(snapshot) => on_snapshot(snapshot),
                    Err(err) => tracing::error!(?err, "failed refreshing watched comment query"),
                }
                if receiver.next().await.is_none() {
                    // unsubscribed; the entry may already be gone
                    this.0.write().await.remove(&watcher_id);
                    return;
                }
            }
        });

        Subscription {
            id: watcher_id,
            feeds: self.clone(),
        }
    }

    /// Wake every watcher whose query matches the just-committed comment.
    pub async fn notify(&self, comment: &Comment) {
        for watcher in self.0.read().await.values() {
            if watcher.query.matches(comment) {
                let _ = watcher.refresh.unbounded_send(());
            }
        }
    }
}

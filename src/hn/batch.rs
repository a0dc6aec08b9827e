use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::hn::client::HnClient;
use crate::hn::types::{Item, ItemId};

impl HnClient {
    /// Fetches many items with at most `worker_count` requests in flight.
    ///
    /// The result lines up index-for-index with `ids`. An id that fails to
    /// load leaves `None` in its slot. Dropping the returned future aborts
    /// every worker it spawned.
    pub async fn get_items_by_ids(&self, ids: &[ItemId]) -> Vec<Option<Arc<Item>>> {
        if ids.is_empty() {
            return Vec::new();
        }

        let (job_tx, job_rx) = async_channel::bounded(ids.len());
        for &id in ids {
            if job_tx.send(id).await.is_err() {
                break;
            }
        }
        job_tx.close();

        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let worker_count = self.config.worker_count.clamp(1, ids.len());

        let mut workers = JoinSet::new();
        for worker in 0..worker_count {
            let client = self.clone();
            let jobs = job_rx.clone();
            let results = result_tx.clone();

            workers.spawn(async move {
                while let Ok(id) = jobs.recv().await {
                    match client.fetch_item(id).await {
                        Ok(item) => {
                            if results.send((id, item)).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Worker {} failed to fetch item {}: {}", worker, id, e),
                    }
                }
            });
        }
        drop(result_tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Batch worker terminated abnormally: {}", e);
            }
        }

        let mut fetched = HashMap::with_capacity(ids.len());
        while let Ok((id, item)) = result_rx.try_recv() {
            fetched.insert(id, item);
        }

        debug!(
            "Batch fetched {}/{} items with {} workers",
            fetched.len(),
            ids.len(),
            worker_count
        );

        ids.iter().map(|id| fetched.get(id).cloned()).collect()
    }
}

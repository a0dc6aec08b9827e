use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::hn::error::HnError;
use crate::hn::types::StoryType;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Anything that can re-prime the story id cache for a ranking.
#[async_trait]
pub trait IdListSource: Send + Sync {
    async fn refresh_story_ids(&self, story_type: StoryType) -> Result<(), HnError>;
}

/// Keeps the story id caches warm independently of request traffic.
///
/// Runs one pass over every [`StoryType`] immediately, then one pass per
/// interval until [`Refresher::stop`] is called. Refresh calls are not tied to
/// any request, so a client hanging up never interrupts them.
#[derive(Clone)]
pub struct Refresher {
    source: Arc<dyn IdListSource>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl Refresher {
    pub fn new(source: Arc<dyn IdListSource>, interval: Duration) -> Self {
        Self {
            source,
            interval: interval.max(MIN_INTERVAL),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn start(&self) -> JoinHandle<()> {
        let refresher = self.clone();
        tokio::spawn(async move { refresher.run().await })
    }

    /// Signals the loop to exit. Safe to call more than once.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub async fn run(&self) {
        info!(
            "Starting background story id refresher (interval {:?})",
            self.interval
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!("Stopping background story id refresher");
                    return;
                }
                _ = ticker.tick() => self.refresh().await,
            }
        }
    }

    async fn refresh(&self) {
        debug!("Refreshing story id caches");

        for story_type in StoryType::ALL {
            let result = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return,
                result = self.source.refresh_story_ids(story_type) => result,
            };

            if let Err(e) = result {
                error!("Failed to refresh {} story ids: {}", story_type, e);
            }
        }
    }
}

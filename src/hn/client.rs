use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::{ExpiringCache, IdListSource};
use crate::config::{CacheConfig, HnConfig};
use crate::hn::error::HnError;
use crate::hn::transport::Transport;
use crate::hn::types::{Item, ItemId, StoryType, User};

/// Cache-or-fetch access to the Hacker News API.
///
/// Items, users and story id lists each sit behind their own
/// [`ExpiringCache`]. Cloning is cheap and every clone shares the same caches
/// and transport.
#[derive(Clone)]
pub struct HnClient {
    transport: Arc<dyn Transport>,
    items: Arc<ExpiringCache<Arc<Item>>>,
    users: Arc<ExpiringCache<Arc<User>>>,
    id_lists: Arc<ExpiringCache<Arc<Vec<ItemId>>>>,
    pub(crate) config: Arc<HnConfig>,
}

impl HnClient {
    pub fn new(transport: Arc<dyn Transport>, config: HnConfig, cache: &CacheConfig) -> Self {
        Self {
            transport,
            items: Arc::new(ExpiringCache::new(cache.item_ttl)),
            users: Arc::new(ExpiringCache::new(cache.item_ttl)),
            id_lists: Arc::new(ExpiringCache::new(cache.idlist_ttl)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &HnConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T, HnError> {
        let body = self.transport.get(&self.url(path)).await?;

        let value: Option<T> = serde_json::from_slice(&body).map_err(|source| HnError::Decode {
            what: what.to_string(),
            source,
        })?;

        value.ok_or_else(|| HnError::NotFound(what.to_string()))
    }

    /// Fetches a single item without its thread.
    ///
    /// Deleted and dead items are returned to the caller but never cached, so
    /// the next request asks the API again.
    pub async fn fetch_item(&self, id: ItemId) -> Result<Arc<Item>, HnError> {
        let key = format!("item:{id}");
        if let Some(item) = self.items.get(&key) {
            return Ok(item);
        }

        let item: Item = self
            .get_json(&format!("item/{id}.json"), &format!("item {id}"))
            .await?;
        let item = Arc::new(item);

        if item.is_visible() {
            self.items.set(key, Arc::clone(&item));
        }

        Ok(item)
    }

    pub async fn get_user(&self, id: &str) -> Result<Arc<User>, HnError> {
        let key = format!("user:{id}");
        if let Some(user) = self.users.get(&key) {
            return Ok(user);
        }

        let user: User = self
            .get_json(&format!("user/{id}.json"), &format!("user {id}"))
            .await?;
        let user = Arc::new(user);

        self.users.set(key, Arc::clone(&user));
        Ok(user)
    }

    pub async fn get_story_ids(&self, story_type: StoryType) -> Result<Arc<Vec<ItemId>>, HnError> {
        let key = format!("idlist:{story_type}");
        if let Some(ids) = self.id_lists.get(&key) {
            debug!("Serving {} story ids from cache", story_type);
            return Ok(ids);
        }

        info!("Fetching {} story ids from API", story_type);
        let ids: Vec<ItemId> = self
            .get_json(
                &format!("{story_type}stories.json"),
                &format!("{story_type} story ids"),
            )
            .await?;
        let ids = Arc::new(ids);

        self.id_lists.set(key, Arc::clone(&ids));
        Ok(ids)
    }

    /// Fetches an item together with its comment thread.
    ///
    /// Children are walked depth-first, one at a time. Deleted or dead
    /// children are dropped along with everything below them, and a child that
    /// fails to load is skipped without affecting its siblings.
    pub async fn get_item(&self, id: ItemId) -> Result<Item, HnError> {
        let item = self.fetch_item(id).await?;
        Ok(self.with_comments(&item).await)
    }

    fn with_comments<'a>(&'a self, item: &'a Item) -> BoxFuture<'a, Item> {
        async move {
            let mut thread = item.clone();

            for &kid in &item.kids {
                match self.fetch_item(kid).await {
                    Ok(child) if child.is_visible() => {
                        thread.comments.push(self.with_comments(&child).await);
                    }
                    Ok(_) => debug!("Pruning deleted or dead comment {}", kid),
                    Err(e) => warn!("Failed to fetch comment {}: {}", kid, e),
                }
            }

            thread
        }
        .boxed()
    }
}

#[async_trait]
impl IdListSource for HnClient {
    async fn refresh_story_ids(&self, story_type: StoryType) -> Result<(), HnError> {
        self.get_story_ids(story_type).await.map(|_| ())
    }
}

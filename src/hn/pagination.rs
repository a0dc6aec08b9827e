use std::ops::Range;
use std::sync::Arc;

use tracing::debug;

use crate::hn::client::HnClient;
use crate::hn::error::HnError;
use crate::hn::types::{Item, StoryType, User, UserView};

/// Index range of `page` (1-based) within a list of `len` entries.
///
/// Returns `None` when the page starts past the end of the list. Page 0 is
/// treated as page 1.
pub fn page_range(len: usize, page: usize, page_size: usize) -> Option<Range<usize>> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= len {
        return None;
    }

    let end = start.saturating_add(page_size).min(len);
    Some(start..end)
}

impl HnClient {
    /// One page of a story ranking, in ranking order.
    ///
    /// A page past the end of the ranking is empty rather than an error. Items
    /// that fail to load keep their slot as `None`.
    pub async fn get_stories_for_page(
        &self,
        story_type: StoryType,
        page: usize,
    ) -> Result<Vec<Option<Arc<Item>>>, HnError> {
        let ids = self.get_story_ids(story_type).await?;

        match page_range(ids.len(), page, self.config.items_per_page) {
            Some(range) => Ok(self.get_items_by_ids(&ids[range]).await),
            None => Ok(Vec::new()),
        }
    }

    /// One page of a user's submissions or comments, in submission order.
    ///
    /// `submitted` is scanned chunk by chunk and scanning stops as soon as the
    /// page is full, so the total number of matches is never known.
    pub async fn get_user_items(&self, user: &User, view: UserView, page: usize) -> Vec<Arc<Item>> {
        let per_page = self.config.items_per_page;
        let chunk_size = self.config.submission_chunk_size.max(1);
        let mut to_skip = page.saturating_sub(1).saturating_mul(per_page);
        let mut found = Vec::with_capacity(per_page);

        // There can be no more matches than submissions.
        if per_page == 0 || to_skip >= user.submitted.len() {
            return found;
        }

        for (scanned, chunk) in user.submitted.chunks(chunk_size).enumerate() {
            let items = self.get_items_by_ids(chunk).await;

            let matching = items
                .into_iter()
                .flatten()
                .filter(|item| item.is_visible() && view.matches(item));

            for item in matching {
                if to_skip > 0 {
                    to_skip -= 1;
                    continue;
                }

                found.push(item);
                if found.len() >= per_page {
                    debug!(
                        "Filled page {} of {:?} for {} after {} chunks",
                        page,
                        view,
                        user.id,
                        scanned + 1
                    );
                    return found;
                }
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_range() {
        assert_eq!(page_range(5, 1, 2), Some(0..2));
        assert_eq!(page_range(5, 2, 2), Some(2..4));
        assert_eq!(page_range(5, 3, 2), Some(4..5));
        assert_eq!(page_range(5, 4, 2), None);
        assert_eq!(page_range(0, 1, 30), None);
        assert_eq!(page_range(5, 0, 2), Some(0..2));
        assert_eq!(page_range(5, usize::MAX, 2), None);
    }
}

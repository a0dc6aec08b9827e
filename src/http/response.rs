use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::hn::{Item, ItemId, StoryType, User, UserView};

/// An item as presented to readers, with the derived fields a page needs.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: String,
    pub by: String,
    pub time: i64,
    pub time_ago: String,
    pub title: String,
    pub url: String,
    pub host: String,
    pub text: String,
    pub score: i64,
    pub parent: ItemId,
    pub descendants: i64,
    pub deleted: bool,
    pub dead: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<ItemView>,
}

impl ItemView {
    pub fn new(item: &Item, now: DateTime<Utc>) -> Self {
        Self {
            rank: None,
            id: item.id,
            kind: item.kind.clone(),
            by: item.by.clone(),
            time: item.time,
            time_ago: item.time_ago(now),
            title: item.title.clone(),
            url: item.url.clone(),
            host: item.host(),
            text: item.text.clone(),
            score: item.score,
            parent: item.parent,
            descendants: item.descendants,
            deleted: item.deleted,
            dead: item.dead,
            comments: item
                .comments
                .iter()
                .map(|comment| ItemView::new(comment, now))
                .collect(),
        }
    }

    pub fn ranked(item: &Item, rank: usize, now: DateTime<Utc>) -> Self {
        Self {
            rank: Some(rank),
            ..Self::new(item, now)
        }
    }
}

/// Position of the `index`-th entry of `page` across the whole ranking.
/// Saturates at `usize::MAX` for absurd page numbers.
pub fn rank(index: usize, page: usize, items_per_page: usize) -> usize {
    page.saturating_sub(1)
        .saturating_mul(items_per_page)
        .saturating_add(index)
        .saturating_add(1)
}

#[derive(Debug, Serialize)]
pub struct StoriesPage {
    pub story_type: StoryType,
    pub page: usize,
    pub next_page: usize,
    pub items_per_page: usize,
    pub stories: Vec<ItemView>,
}

impl StoriesPage {
    /// Empty slots keep their rank so numbering stays stable across gaps.
    pub fn new(
        story_type: StoryType,
        page: usize,
        items_per_page: usize,
        stories: &[Option<Arc<Item>>],
        now: DateTime<Utc>,
    ) -> Self {
        let stories = stories
            .iter()
            .enumerate()
            .filter_map(|(index, story)| {
                story
                    .as_ref()
                    .map(|story| ItemView::ranked(story, rank(index, page, items_per_page), now))
            })
            .collect();

        Self {
            story_type,
            page,
            next_page: page.saturating_add(1),
            items_per_page,
            stories,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub id: String,
    pub created: i64,
    pub created_date: String,
    pub karma: i64,
    pub about: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<UserView>,
    pub page: usize,
    pub next_page: usize,
    pub items_per_page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<ItemView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<ItemView>>,
}

impl UserPage {
    pub fn new(user: &User, page: usize, items_per_page: usize) -> Self {
        Self {
            id: user.id.clone(),
            created: user.created,
            created_date: user.created_date(),
            karma: user.karma,
            about: user.about.clone(),
            view: None,
            page,
            next_page: page.saturating_add(1),
            items_per_page,
            submissions: None,
            comments: None,
        }
    }

    pub fn with_items(mut self, view: UserView, items: &[Arc<Item>], now: DateTime<Utc>) -> Self {
        let items = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                ItemView::ranked(item, rank(index, self.page, self.items_per_page), now)
            })
            .collect();

        self.view = Some(view);
        match view {
            UserView::Submissions => self.submissions = Some(items),
            UserView::Comments => self.comments = Some(items),
        }
        self
    }
}

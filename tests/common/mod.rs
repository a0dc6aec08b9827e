#![allow(dead_code)]

use std::sync::Arc;

use hn_frontend::config::{CacheConfig, HnConfig};
use hn_frontend::hn::mock::{MockTransport, MOCK_BASE_URL};
use hn_frontend::hn::{HnClient, Item, ItemId};

pub fn client_with(transport: &Arc<MockTransport>, items_per_page: usize) -> HnClient {
    let config = HnConfig {
        base_url: MOCK_BASE_URL.to_string(),
        items_per_page,
        ..HnConfig::default()
    };
    HnClient::new(transport.clone(), config, &CacheConfig::default())
}

pub fn story(id: ItemId) -> Item {
    Item {
        id,
        kind: "story".to_string(),
        by: "pg".to_string(),
        title: format!("Story {id}"),
        url: format!("https://www.example.com/{id}"),
        ..Default::default()
    }
}

pub fn comment(id: ItemId, parent: ItemId, kids: &[ItemId]) -> Item {
    Item {
        id,
        kind: "comment".to_string(),
        by: "pg".to_string(),
        parent,
        text: format!("Comment {id}"),
        kids: kids.to_vec(),
        ..Default::default()
    }
}

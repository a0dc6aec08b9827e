use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use url::Url;

pub type ItemId = u64;

/// A story, comment, job, poll or ask post.
///
/// Missing fields default to their zero value, unknown fields are ignored.
/// `comments` is never read from the wire; it is filled in when an item is
/// requested together with its thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: ItemId,
    pub deleted: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub by: String,
    pub time: i64,
    pub text: String,
    pub dead: bool,
    pub parent: ItemId,
    pub kids: Vec<ItemId>,
    pub url: String,
    pub score: i64,
    pub title: String,
    pub descendants: i64,
    #[serde(skip_deserializing)]
    pub comments: Vec<Item>,
}

impl Item {
    pub fn is_comment(&self) -> bool {
        self.kind == "comment"
    }

    /// Deleted and dead items are shown when asked for directly but are never
    /// cached or listed.
    pub fn is_visible(&self) -> bool {
        !self.deleted && !self.dead
    }

    pub fn host(&self) -> String {
        if self.url.is_empty() {
            return String::new();
        }

        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .map(|host| host.trim_start_matches("www.").to_owned())
            .unwrap_or_default()
    }

    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.timestamp() - self.time;
        let minutes = elapsed / 60;
        let hours = minutes / 60;

        match hours {
            h if h >= 48 => format!("{} days ago", h / 24),
            h if h >= 24 => "1 day ago".to_string(),
            h if h >= 2 => format!("{h} hours ago"),
            1 => "1 hour ago".to_string(),
            _ => match minutes {
                m if m >= 2 => format!("{m} minutes ago"),
                1 => "1 minute ago".to_string(),
                _ => "just now".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub created: i64,
    pub karma: i64,
    pub about: String,
    /// Newest first.
    pub submitted: Vec<ItemId>,
}

impl User {
    pub fn created_date(&self) -> String {
        DateTime::from_timestamp(self.created, 0)
            .map(|created| created.format("%B %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    #[display("top")]
    Top,
    #[display("new")]
    New,
    #[display("ask")]
    Ask,
    #[display("show")]
    Show,
    #[display("job")]
    Job,
}

impl StoryType {
    pub const ALL: [StoryType; 5] = [
        StoryType::Top,
        StoryType::New,
        StoryType::Ask,
        StoryType::Show,
        StoryType::Job,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::Top => "top",
            StoryType::New => "new",
            StoryType::Ask => "ask",
            StoryType::Show => "show",
            StoryType::Job => "job",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown story type '{0}'")]
pub struct UnknownStoryType(pub String);

impl FromStr for StoryType {
    type Err = UnknownStoryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoryType::ALL
            .into_iter()
            .find(|story_type| story_type.as_str() == s)
            .ok_or_else(|| UnknownStoryType(s.to_string()))
    }
}

/// Which slice of a user's submissions to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserView {
    Submissions,
    Comments,
}

impl UserView {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            UserView::Submissions => !item.is_comment(),
            UserView::Comments => item.is_comment(),
        }
    }
}

impl FromStr for UserView {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submissions" => Ok(UserView::Submissions),
            "comments" => Ok(UserView::Comments),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_item_lenient_decode() {
        let json = r#"{"id": 8863, "type": "story", "by": "dhouston", "kids": [9224, 8917],
            "score": 111, "title": "My YC app", "url": "http://www.getdropbox.com/u/2/screencast.html",
            "poll": 12, "comments": [{"id": 1}]}"#;
        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, 8863);
        assert_eq!(item.kind, "story");
        assert_eq!(item.kids, vec![9224, 8917]);
        assert!(!item.deleted);
        assert_eq!(item.text, "");
        assert!(item.comments.is_empty());
    }

    #[test]
    fn test_host() {
        let item = Item {
            url: "https://www.example.com/path?q=1".to_string(),
            ..Default::default()
        };
        assert_eq!(item.host(), "example.com");

        assert_eq!(Item::default().host(), "");

        let bad = Item {
            url: "not a url".to_string(),
            ..Default::default()
        };
        assert_eq!(bad.host(), "");
    }

    #[test]
    fn test_time_ago() {
        let now = Utc.timestamp_opt(1_000_000, 0).unwrap();
        let at = |seconds_ago: i64| Item {
            time: 1_000_000 - seconds_ago,
            ..Default::default()
        };

        assert_eq!(at(30).time_ago(now), "just now");
        assert_eq!(at(60).time_ago(now), "1 minute ago");
        assert_eq!(at(5 * 60).time_ago(now), "5 minutes ago");
        assert_eq!(at(3600).time_ago(now), "1 hour ago");
        assert_eq!(at(3 * 3600).time_ago(now), "3 hours ago");
        assert_eq!(at(30 * 3600).time_ago(now), "1 day ago");
        assert_eq!(at(5 * 24 * 3600).time_ago(now), "5 days ago");
    }

    #[test]
    fn test_created_date() {
        let user = User {
            created: 1_160_418_111,
            ..Default::default()
        };
        assert_eq!(user.created_date(), "October 9, 2006");
    }

    #[test]
    fn test_story_type_round_trip() {
        for story_type in StoryType::ALL {
            assert_eq!(story_type.as_str().parse::<StoryType>(), Ok(story_type));
            assert_eq!(story_type.to_string(), story_type.as_str());
        }
        assert!("best".parse::<StoryType>().is_err());
    }

    #[test]
    fn test_user_view_matches() {
        let comment = Item {
            kind: "comment".to_string(),
            ..Default::default()
        };
        let story = Item {
            kind: "story".to_string(),
            ..Default::default()
        };

        assert!(UserView::Comments.matches(&comment));
        assert!(!UserView::Comments.matches(&story));
        assert!(UserView::Submissions.matches(&story));
        assert!(!UserView::Submissions.matches(&comment));
    }
}

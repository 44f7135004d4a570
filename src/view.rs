//! View models for the list and the detail overlay
//!
//! Pure data: the DOM code in `platform::dom` only copies these fields
//! into elements.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

use crate::post::{Post, PostId};
use crate::settings::BoardSettings;

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    List,
    /// Detail overlay open for one post
    Detail(PostId),
}

/// Click target in the list or overlay, decoded from `data-action`/`data-id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open(PostId),
    Edit(PostId),
    Delete(PostId),
    Close,
}

impl Action {
    pub const OPEN: &'static str = "open";
    pub const EDIT: &'static str = "edit";
    pub const DELETE: &'static str = "delete";
    pub const CLOSE: &'static str = "close";

    /// Actions on a post need a numeric id; `close` ignores it
    pub fn parse(action: &str, id: Option<&str>) -> Option<Self> {
        let id = id.and_then(|s| s.trim().parse::<i64>().ok()).map(PostId);
        match (action, id) {
            (Self::OPEN, Some(id)) => Some(Action::Open(id)),
            (Self::EDIT, Some(id)) => Some(Action::Edit(id)),
            (Self::DELETE, Some(id)) => Some(Action::Delete(id)),
            (Self::CLOSE, _) => Some(Action::Close),
            _ => None,
        }
    }
}

/// One entry of the post list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: PostId,
    pub image: String,
    pub nickname: String,
    pub title: String,
    /// Always the placeholder, never the content
    pub summary: String,
    pub date: String,
}

/// Contents of the detail overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: PostId,
    pub nickname: String,
    pub title: String,
    pub content: String,
}

impl From<&Post> for DetailView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            nickname: post.nickname.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }
}

/// Cards for every post, in store order
pub fn list_cards(posts: &[Post], settings: &BoardSettings, utc_offset_minutes: i32) -> Vec<PostCard> {
    posts
        .iter()
        .map(|post| PostCard {
            id: post.id,
            image: post.image.clone(),
            nickname: post.nickname.clone(),
            title: post.title.clone(),
            summary: settings.summary_placeholder.clone(),
            date: format_date(post.id, utc_offset_minutes, &settings.date_format),
        })
        .collect()
}

/// Creation date of a post, derived from its id.
///
/// `utc_offset_minutes` is local time minus UTC (+540 for KST). Ids outside
/// chrono's range or a bad format string give an empty string.
pub fn format_date(id: PostId, utc_offset_minutes: i32, format: &str) -> String {
    let Some(offset) = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) else {
        return String::new();
    };
    let Some(utc) = DateTime::from_timestamp_millis(id.as_millis()) else {
        return String::new();
    };

    let mut out = String::new();
    if write!(out, "{}", utc.with_timezone(&offset).format(format)).is_err() {
        log::warn!("Invalid date format '{}'", format);
        out.clear();
    }
    out
}

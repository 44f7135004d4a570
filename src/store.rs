//! Post collection mirrored to key-value storage
//!
//! The whole sequence is written as one JSON array under a single key on
//! every mutation, and read back as a whole on start-up.

use std::collections::HashSet;

use crate::error::StorageError;
use crate::post::{Post, PostId};
use crate::storage::KeyValueStorage;

/// Ordered (creation order) collection of posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    key: String,
    posts: Vec<Post>,
}

impl Store {
    /// Storage key used by the board
    pub const DEFAULT_KEY: &'static str = "posts";

    /// Empty store persisting under `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            posts: Vec::new(),
        }
    }

    /// Read the persisted collection.
    ///
    /// A missing entry, an unreadable backend or malformed JSON all yield an
    /// empty store. Records repeating an earlier id get a fresh one.
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S, key: &str) -> Self {
        let mut store = Self::new(key);

        match storage.get_item(key) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Post>>(&json) {
                Ok(posts) => {
                    log::info!("Loaded {} posts", posts.len());
                    store.posts = with_unique_ids(posts);
                }
                Err(e) => log::warn!("Ignoring unreadable posts under '{}': {}", key, e),
            },
            Ok(None) => log::info!("No posts found, starting fresh"),
            Err(e) => log::warn!("Could not read posts: {}", e),
        }

        store
    }

    /// Overwrite the persisted collection with the current sequence
    pub fn save<S: KeyValueStorage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        write_posts(storage, &self.key, &self.posts)
    }

    /// Apply `mutation` to a copy of the posts, persist the copy, then adopt it.
    ///
    /// If the write fails the in-memory sequence is untouched, so memory and
    /// storage never disagree after a failed action.
    pub fn commit<S, F, T>(&mut self, storage: &mut S, mutation: F) -> Result<T, StorageError>
    where
        S: KeyValueStorage + ?Sized,
        F: FnOnce(&mut Vec<Post>) -> T,
    {
        let mut next = self.posts.clone();
        let out = mutation(&mut next);
        write_posts(storage, &self.key, &next)?;
        self.posts = next;
        Ok(out)
    }

    pub fn add(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Drop the post with `id`; returns whether anything was removed
    pub fn remove(&mut self, id: PostId) -> bool {
        remove_from(&mut self.posts, id)
    }

    pub fn find(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Id for a post created at `now_ms`.
    ///
    /// Normally the timestamp itself; bumped past the newest existing id
    /// when two posts land in the same millisecond or the clock steps back.
    /// If the newest id is `i64::MAX`, the first free id from `now_ms` up.
    pub fn next_id(&self, now_ms: i64) -> PostId {
        match self.posts.iter().map(|p| p.id.0).max() {
            Some(max) if now_ms <= max => match max.checked_add(1) {
                Some(next) => PostId(next),
                None => {
                    let taken: HashSet<i64> = self.posts.iter().map(|p| p.id.0).collect();
                    PostId(first_free(&taken, now_ms))
                }
            },
            _ => PostId(now_ms),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Remove the first post with `id`, the same one `find` returns
pub(crate) fn remove_from(posts: &mut Vec<Post>, id: PostId) -> bool {
    match posts.iter().position(|p| p.id == id) {
        Some(index) => {
            posts.remove(index);
            true
        }
        None => false,
    }
}

/// Smallest id at or after `start` (wrapping) that is not taken.
/// `taken` is finite, so this always ends.
fn first_free(taken: &HashSet<i64>, start: i64) -> i64 {
    let mut candidate = start;
    while taken.contains(&candidate) {
        candidate = candidate.wrapping_add(1);
    }
    candidate
}

/// Keep the first post for each id; later repeats are renumbered
fn with_unique_ids(mut posts: Vec<Post>) -> Vec<Post> {
    let mut taken: HashSet<i64> = posts.iter().map(|p| p.id.0).collect();
    let mut seen = HashSet::with_capacity(posts.len());

    for post in posts.iter_mut() {
        if seen.insert(post.id.0) {
            continue;
        }
        let fresh = first_free(&taken, post.id.0);
        log::warn!("Duplicate post id {} renumbered to {}", post.id, fresh);
        taken.insert(fresh);
        seen.insert(fresh);
        post.id = PostId(fresh);
    }
    posts
}

fn write_posts<S: KeyValueStorage + ?Sized>(
    storage: &mut S,
    key: &str,
    posts: &[Post],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(posts)?;
    storage.set_item(key, &json)?;
    log::debug!("Posts saved ({} entries)", posts.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{DEFAULT_IMAGE, PostForm};
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;

    fn post(id: i64, title: &str) -> Post {
        Post::from_form(PostId(id), &PostForm::new("nick", title, "body"), "pw", DEFAULT_IMAGE)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = MemoryStorage::new();
        let store = Store::load(&storage, Store::DEFAULT_KEY);
        assert!(store.is_empty());
        assert_eq!(store.key(), "posts");
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item("posts", "{not json").unwrap();
        assert!(Store::load(&storage, "posts").is_empty());

        storage.set_item("posts", r#"{"id":1}"#).unwrap();
        assert!(Store::load(&storage, "posts").is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let mut store = Store::new("posts");
        store.add(post(1, "first"));
        store.add(post(2, "second"));
        store.save(&mut storage).unwrap();

        let loaded = Store::load(&storage, "posts");
        assert_eq!(loaded, store);
        assert_eq!(loaded.posts()[0].title, "first");
    }

    #[test]
    fn test_find_and_remove() {
        let mut store = Store::new("posts");
        store.add(post(1, "a"));
        store.add(post(2, "b"));
        store.add(post(3, "c"));

        assert_eq!(store.find(PostId(2)).map(|p| p.title.as_str()), Some("b"));
        assert!(store.find(PostId(9)).is_none());

        assert!(store.remove(PostId(2)));
        assert!(!store.remove(PostId(2)));
        let ids: Vec<_> = store.posts().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let mut store = Store::new("posts");
        assert_eq!(store.next_id(1000), PostId(1000));

        store.add(post(1000, "a"));
        // Same millisecond
        assert_eq!(store.next_id(1000), PostId(1001));
        // Clock went backwards
        assert_eq!(store.next_id(500), PostId(1001));
        assert_eq!(store.next_id(2000), PostId(2000));
    }

    #[test]
    fn test_next_id_at_max_does_not_overflow() {
        let mut store = Store::new("posts");
        store.add(post(i64::MAX, "last"));
        assert_eq!(store.next_id(1000), PostId(1000));

        store.add(post(1000, "a"));
        assert_eq!(store.next_id(1000), PostId(1001));
    }

    #[test]
    fn test_load_renumbers_duplicate_ids() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "posts",
                r#"[{"id":5,"nickname":"a","title":"t","content":"c","password":"p"},
                    {"id":5,"nickname":"b","title":"t","content":"c","password":"q"},
                    {"id":6,"nickname":"c","title":"t","content":"c","password":"r"}]"#,
            )
            .unwrap();

        let store = Store::load(&storage, "posts");
        let ids: Vec<_> = store.posts().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![5, 7, 6]);
        assert_eq!(store.find(PostId(5)).unwrap().password, "p");
        assert_eq!(store.find(PostId(7)).unwrap().password, "q");
    }

    #[test]
    fn test_remove_takes_only_first_match() {
        let mut store = Store::new("posts");
        store.add(post(5, "a"));
        store.add(post(5, "b"));
        assert!(store.remove(PostId(5)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.posts()[0].title, "b");
    }

    #[test]
    fn test_commit_failure_keeps_memory() {
        let mut storage = MemoryStorage::new();
        let mut store = Store::new("posts");
        store.commit(&mut storage, |posts| posts.push(post(1, "a"))).unwrap();

        storage.set_read_only(true);
        let result = store.commit(&mut storage, |posts| posts.push(post(2, "b")));
        assert!(matches!(result, Err(StorageError::Rejected(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(Store::load(&storage, "posts"), store);
    }

    fn arb_post() -> impl Strategy<Value = Post> {
        (
            any::<i64>(),
            "\\PC{1,12}",
            "\\PC{1,12}",
            "\\PC{0,40}",
            "\\PC{0,20}",
            "\\PC{1,8}",
        )
            .prop_map(|(id, nickname, title, content, image, password)| Post {
                id: PostId(id),
                nickname,
                title,
                content,
                image,
                password,
            })
    }

    proptest! {
        #[test]
        fn prop_round_trip(posts in prop::collection::vec(arb_post(), 0..16)) {
            let mut ids = HashSet::new();
            let posts: Vec<Post> = posts.into_iter().filter(|p| ids.insert(p.id)).collect();
            let mut storage = MemoryStorage::new();
            let mut store = Store::new("posts");
            for p in posts.iter().cloned() {
                store.add(p);
            }
            store.save(&mut storage).unwrap();

            let loaded = Store::load(&storage, "posts");
            prop_assert_eq!(loaded.posts(), posts.as_slice());
        }

        #[test]
        fn prop_next_id_never_collides(times in prop::collection::vec(0i64..50, 1..32)) {
            let mut store = Store::new("posts");
            for t in times {
                let id = store.next_id(t);
                prop_assert!(store.find(id).is_none());
                store.add(post(id.0, "t"));
            }
        }
    }
}

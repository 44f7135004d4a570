//! Board controller
//!
//! Owns the post store, its storage backend and the current view. Each
//! public method is one user action: it either completes (mutation
//! persisted, view updated) or fails with a [`BoardError`] and leaves
//! everything as it was. Failures the user should see are also alerted
//! through the [`Dialog`].

use crate::dialog::Dialog;
use crate::error::{BoardError, BoardResult};
use crate::messages;
use crate::post::{Field, Post, PostForm, PostId};
use crate::settings::BoardSettings;
use crate::storage::KeyValueStorage;
use crate::store::{self, Store};
use crate::view::{self, DetailView, PostCard, ViewState};

/// The bulletin board: store + persistence + view state
pub struct Board<S: KeyValueStorage> {
    store: Store,
    storage: S,
    settings: BoardSettings,
    view: ViewState,
}

impl<S: KeyValueStorage> Board<S> {
    /// Load posts from `storage` under the configured key
    pub fn load(storage: S, settings: BoardSettings) -> Self {
        let store = Store::load(&storage, &settings.storage_key);
        Self {
            store,
            storage,
            settings,
            view: ViewState::List,
        }
    }

    pub fn posts(&self) -> &[Post] {
        self.store.posts()
    }

    pub fn find(&self, id: PostId) -> Option<&Post> {
        self.store.find(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// List entries for rendering
    pub fn cards(&self, utc_offset_minutes: i32) -> Vec<PostCard> {
        view::list_cards(self.store.posts(), &self.settings, utc_offset_minutes)
    }

    /// Overlay contents, if the overlay is open
    pub fn detail(&self) -> Option<DetailView> {
        match self.view {
            ViewState::Detail(id) => self.store.find(id).map(DetailView::from),
            ViewState::List => None,
        }
    }

    /// Create a post from the form.
    ///
    /// The password is requested first, then all four required values are
    /// checked. On success the new post is persisted and its id returned;
    /// the caller re-renders and clears the form.
    pub fn submit<D: Dialog>(
        &mut self,
        form: &PostForm,
        dialog: &mut D,
        now_ms: i64,
    ) -> BoardResult<PostId> {
        let password = dialog.prompt(messages::ASK_NEW_PASSWORD, None);
        let result = self.create(form, password.as_deref(), now_ms);
        report(dialog, result)
    }

    fn create(&mut self, form: &PostForm, password: Option<&str>, now_ms: i64) -> BoardResult<PostId> {
        if let Some(field) = form.missing_field(password) {
            log::debug!("Submit rejected, missing {}", field);
            return Err(BoardError::MissingField(field));
        }
        let password = password.ok_or(BoardError::MissingField(Field::Password))?;

        let id = self.store.next_id(now_ms);
        let post = Post::from_form(id, form, password, &self.settings.default_image);
        self.store.commit(&mut self.storage, |posts| posts.push(post))?;

        log::info!("Post {} created ({} total)", id, self.store.len());
        Ok(id)
    }

    /// Open the detail overlay for `id`
    pub fn open_detail(&mut self, id: PostId) -> BoardResult<DetailView> {
        let post = self.store.find(id).ok_or(BoardError::NotFound(id))?;
        let detail = DetailView::from(post);
        self.view = ViewState::Detail(id);
        Ok(detail)
    }

    /// Back to the list. Returns whether an overlay was open.
    pub fn close_detail(&mut self) -> bool {
        let was_open = matches!(self.view, ViewState::Detail(_));
        self.view = ViewState::List;
        was_open
    }

    /// Replace title and content after a password check.
    ///
    /// Leaving either new value blank (or cancelling) aborts silently.
    pub fn edit_post<D: Dialog>(&mut self, id: PostId, dialog: &mut D) -> BoardResult<()> {
        let result = self.edit(id, dialog);
        report(dialog, result)
    }

    fn edit<D: Dialog>(&mut self, id: PostId, dialog: &mut D) -> BoardResult<()> {
        let post = self.authorize(id, dialog, messages::ASK_EDIT_PASSWORD)?;
        let (old_title, old_content) = (post.title.clone(), post.content.clone());

        let title = dialog.prompt(messages::ASK_NEW_TITLE, Some(&old_title));
        let content = dialog.prompt(messages::ASK_NEW_CONTENT, Some(&old_content));
        let (Some(title), Some(content)) = (non_blank(title), non_blank(content)) else {
            log::debug!("Edit of post {} abandoned", id);
            return Err(BoardError::Cancelled);
        };

        let found = self.store.commit(&mut self.storage, |posts| {
            match posts.iter_mut().find(|p| p.id == id) {
                Some(post) => {
                    post.title = title;
                    post.content = content;
                    true
                }
                None => false,
            }
        })?;
        if !found {
            return Err(BoardError::NotFound(id));
        }

        self.close_detail();
        log::info!("Post {} edited", id);
        Ok(())
    }

    /// Remove a post after a password check and an explicit confirmation
    pub fn delete_post<D: Dialog>(&mut self, id: PostId, dialog: &mut D) -> BoardResult<()> {
        let result = self.delete(id, dialog);
        report(dialog, result)
    }

    fn delete<D: Dialog>(&mut self, id: PostId, dialog: &mut D) -> BoardResult<()> {
        self.authorize(id, dialog, messages::ASK_DELETE_PASSWORD)?;

        if !dialog.confirm(messages::CONFIRM_DELETE) {
            log::debug!("Delete of post {} declined", id);
            return Err(BoardError::Cancelled);
        }

        let removed = self
            .store
            .commit(&mut self.storage, |posts| store::remove_from(posts, id))?;
        if !removed {
            return Err(BoardError::NotFound(id));
        }

        self.close_detail();
        log::info!("Post {} deleted ({} left)", id, self.store.len());
        Ok(())
    }

    /// Ask for the password of `id` and compare it exactly.
    /// A cancelled prompt counts as a wrong password.
    fn authorize<D: Dialog>(&self, id: PostId, dialog: &mut D, question: &str) -> BoardResult<&Post> {
        let post = self.store.find(id).ok_or(BoardError::NotFound(id))?;
        let answer = dialog.prompt(question, None);

        match answer {
            Some(candidate) if post.password_matches(&candidate) => Ok(post),
            _ => {
                log::info!("Wrong password for post {}", id);
                Err(BoardError::WrongPassword(id))
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Alert user-visible failures, then hand the result back
fn report<D: Dialog, T>(dialog: &mut D, result: BoardResult<T>) -> BoardResult<T> {
    if let Err(e) = &result {
        if let Some(text) = alert_text(e) {
            dialog.alert(text);
        }
        if let BoardError::Storage(inner) = e {
            log::error!("Could not persist posts: {}", inner);
        }
    }
    result
}

fn alert_text(error: &BoardError) -> Option<&'static str> {
    if !error.is_user_visible() {
        return None;
    }
    Some(match error {
        BoardError::MissingField(_) => messages::MISSING_FIELDS,
        BoardError::WrongPassword(_) => messages::WRONG_PASSWORD,
        BoardError::NotFound(_) => messages::POST_NOT_FOUND,
        BoardError::Storage(_) => messages::SAVE_FAILED,
        BoardError::Cancelled => return None,
    })
}

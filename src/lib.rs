//! Bulletin Board - a single-page post board persisted in LocalStorage
//!
//! Core modules:
//! - `board`: Controller for create/read/update/delete actions
//! - `store`: Post collection mirrored to key-value storage
//! - `view`: List and overlay view models
//! - `dialog`: Prompt/confirm/alert abstraction
//! - `platform`: Browser storage, dialogs and DOM (wasm32 only)

pub mod board;
pub mod dialog;
pub mod error;
pub mod messages;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod post;
pub mod settings;
pub mod storage;
pub mod store;
pub mod view;

pub use board::Board;
pub use dialog::{Dialog, ScriptedDialog};
pub use error::{BoardError, BoardResult, StorageError};
pub use post::{Post, PostForm, PostId};
pub use settings::BoardSettings;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::Store;
pub use view::{Action, ViewState};

//! Browser platform layer
//!
//! Everything that touches `web_sys` lives here:
//! - `storage`: LocalStorage as a [`KeyValueStorage`](crate::storage::KeyValueStorage)
//! - `dialog`: `window.prompt/confirm/alert` as a [`Dialog`](crate::dialog::Dialog)
//! - `dom`: list/overlay rendering and form access

pub mod dialog;
pub mod dom;
pub mod storage;

pub use dialog::BrowserDialog;
pub use storage::LocalStorage;

/// Local time minus UTC, in minutes (JS reports the opposite sign)
pub fn utc_offset_minutes() -> i32 {
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

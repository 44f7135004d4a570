//! Browser `prompt`/`confirm`/`alert` behind the `Dialog` trait

use web_sys::Window;

use crate::dialog::Dialog;

/// Native browser dialogs
pub struct BrowserDialog {
    window: Window,
}

impl BrowserDialog {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Dialog for BrowserDialog {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        let answer = match default {
            Some(default) => self.window.prompt_with_message_and_default(message, default),
            None => self.window.prompt_with_message(message),
        };
        answer.unwrap_or_else(|e| {
            log::warn!("prompt failed: {:?}", e);
            None
        })
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {:?}", e);
        }
    }
}

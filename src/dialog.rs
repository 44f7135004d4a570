//! User interaction surface for the controller
//!
//! Mirrors the browser's `prompt`/`confirm`/`alert`, but as a trait so the
//! board logic can run without a window.

use std::collections::VecDeque;

/// Blocking request/response interaction with the user
pub trait Dialog {
    /// Ask for a line of text. `None` when the user cancels.
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String>;
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;
    /// Show a message the user must acknowledge
    fn alert(&mut self, message: &str);
}

/// One pre-recorded user response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Prompt dismissed with Cancel
    Cancel,
    Confirm(bool),
}

/// Dialog that plays back queued replies and records what was shown.
///
/// Used by tests and by the native build. An exhausted queue behaves like
/// a user who cancels everything.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialog {
    replies: VecDeque<Reply>,
    /// Alerts shown so far, oldest first
    pub alerts: Vec<String>,
    /// Prompt and confirm messages shown so far
    pub asked: Vec<String>,
}

impl ScriptedDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.replies.push_back(Reply::Text(text.into()));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.replies.push_back(Reply::Cancel);
        self
    }

    pub fn confirm_with(mut self, yes: bool) -> Self {
        self.replies.push_back(Reply::Confirm(yes));
        self
    }

    /// Replies not consumed yet
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Dialog for ScriptedDialog {
    fn prompt(&mut self, message: &str, _default: Option<&str>) -> Option<String> {
        self.asked.push(message.to_string());
        match self.replies.pop_front() {
            Some(Reply::Text(text)) => Some(text),
            Some(other) => {
                log::warn!("Prompt '{}' got unexpected reply {:?}", message, other);
                None
            }
            None => None,
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        matches!(self.replies.pop_front(), Some(Reply::Confirm(true)))
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replies_in_order() {
        let mut dialog = ScriptedDialog::new().text("pw").cancel().confirm_with(true);
        assert_eq!(dialog.prompt("password?", None).as_deref(), Some("pw"));
        assert_eq!(dialog.prompt("title?", Some("old")), None);
        assert!(dialog.confirm("sure?"));
        assert_eq!(dialog.remaining(), 0);
        assert_eq!(dialog.asked, vec!["password?", "title?", "sure?"]);
    }

    #[test]
    fn test_exhausted_dialog_cancels() {
        let mut dialog = ScriptedDialog::new();
        assert_eq!(dialog.prompt("anything", None), None);
        assert!(!dialog.confirm("sure?"));
        dialog.alert("oops");
        assert_eq!(dialog.alerts, vec!["oops"]);
    }
}

//! Post records and form validation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Image shown for posts submitted without a picture
pub const DEFAULT_IMAGE: &str = "./images/people.png";

/// Post identifier: creation time in milliseconds since the Unix epoch.
///
/// Serialized as a bare number so the stored collection stays a plain
/// array of objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl PostId {
    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether `image` is a session-scoped object URL that must be released
/// once nothing shows it
pub fn is_object_url(image: &str) -> bool {
    image.starts_with("blob:")
}

/// A single bulletin entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub nickname: String,
    pub title: String,
    pub content: String,
    /// Image reference; older records without one get the placeholder
    #[serde(default = "default_image")]
    pub image: String,
    /// Plaintext edit/delete password
    pub password: String,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

impl Post {
    /// Build a post from a form that already passed [`PostForm::missing_field`].
    ///
    /// Text fields are stored trimmed. An absent or empty image falls back
    /// to `placeholder`.
    pub fn from_form(id: PostId, form: &PostForm, password: &str, placeholder: &str) -> Self {
        let image = form
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(placeholder);

        Self {
            id,
            nickname: form.nickname.trim().to_string(),
            title: form.title.trim().to_string(),
            content: form.content.trim().to_string(),
            image: image.to_string(),
            password: password.to_string(),
        }
    }

    /// Exact, case-sensitive comparison against the stored password
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// Required inputs of the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nickname,
    Title,
    Content,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Nickname => "nickname",
            Field::Title => "title",
            Field::Content => "content",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values read from the create form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub nickname: String,
    pub title: String,
    pub content: String,
    /// Object URL of the selected file, if any
    pub image: Option<String>,
}

impl PostForm {
    pub fn new(
        nickname: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            title: title.into(),
            content: content.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// First required field that is empty, checked in form order.
    ///
    /// Text fields are trimmed before the check; the password is not, a
    /// password of spaces is still a password.
    pub fn missing_field(&self, password: Option<&str>) -> Option<Field> {
        if self.nickname.trim().is_empty() {
            return Some(Field::Nickname);
        }
        if self.title.trim().is_empty() {
            return Some(Field::Title);
        }
        if self.content.trim().is_empty() {
            return Some(Field::Content);
        }
        match password {
            Some(p) if !p.is_empty() => None,
            _ => Some(Field::Password),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_order() {
        let form = PostForm::new("", "", "");
        assert_eq!(form.missing_field(None), Some(Field::Nickname));

        let form = PostForm::new("a", "  ", "c");
        assert_eq!(form.missing_field(Some("p")), Some(Field::Title));

        let form = PostForm::new("a", "b", "\t");
        assert_eq!(form.missing_field(Some("p")), Some(Field::Content));

        let form = PostForm::new("a", "b", "c");
        assert_eq!(form.missing_field(None), Some(Field::Password));
        assert_eq!(form.missing_field(Some("")), Some(Field::Password));
        assert_eq!(form.missing_field(Some(" ")), None);
        assert_eq!(form.missing_field(Some("p")), None);
    }

    #[test]
    fn test_from_form_trims_and_defaults_image() {
        let form = PostForm::new(" a ", "b\n", "  c");
        let post = Post::from_form(PostId(1), &form, " p ", DEFAULT_IMAGE);
        assert_eq!(post.nickname, "a");
        assert_eq!(post.title, "b");
        assert_eq!(post.content, "c");
        assert_eq!(post.password, " p ");
        assert_eq!(post.image, DEFAULT_IMAGE);

        let form = form.with_image("blob:http://localhost/1234");
        let post = Post::from_form(PostId(1), &form, "p", DEFAULT_IMAGE);
        assert_eq!(post.image, "blob:http://localhost/1234");

        let form = PostForm::new("a", "b", "c").with_image("");
        let post = Post::from_form(PostId(1), &form, "p", "custom.png");
        assert_eq!(post.image, "custom.png");
    }

    #[test]
    fn test_object_url_detection() {
        assert!(is_object_url("blob:http://localhost:8080/4f1c"));
        assert!(!is_object_url(DEFAULT_IMAGE));
        assert!(!is_object_url("https://example.com/a.png"));
        assert!(!is_object_url(""));
    }

    #[test]
    fn test_password_is_case_sensitive() {
        let post = Post::from_form(PostId(1), &PostForm::new("a", "b", "c"), "Secret", DEFAULT_IMAGE);
        assert!(post.password_matches("Secret"));
        assert!(!post.password_matches("secret"));
        assert!(!post.password_matches("Secret "));
    }

    #[test]
    fn test_json_shape() {
        let post = Post::from_form(PostId(1738627200000), &PostForm::new("a", "b", "c"), "p", DEFAULT_IMAGE);
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["id"], serde_json::json!(1738627200000i64));
        assert_eq!(value["nickname"], "a");
        assert_eq!(value["image"], DEFAULT_IMAGE);

        let parsed: Post = serde_json::from_str(
            r#"{"id":5,"nickname":"n","title":"t","content":"c","password":"p"}"#,
        )
        .unwrap();
        assert_eq!(parsed.id, PostId(5));
        assert_eq!(parsed.image, DEFAULT_IMAGE);
    }
}

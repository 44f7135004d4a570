//! DOM access for the board page
//!
//! Text is always written with `set_text_content`, so post fields are
//! shown literally and never parsed as markup.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlImageElement, HtmlInputElement, Url};

use crate::messages;
use crate::post::{self, PostForm};
use crate::view::{Action, DetailView, PostCard};

pub const NICKNAME_INPUT: &str = ".name input";
pub const TITLE_INPUT: &str = ".title input";
pub const CONTENT_INPUT: &str = ".contentWriteBox input";
pub const IMAGE_INPUT: &str = "#imageUpload";
pub const PROFILE_IMAGE: &str = "#profileImage";
pub const SUBMIT_BUTTON: &str = ".writeBox button";
pub const LIST: &str = ".contentBack";
pub const OVERLAY: &str = ".popup";

fn query(document: &Document, selector: &str) -> Result<Element, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("missing element '{}'", selector)))
}

fn input(document: &Document, selector: &str) -> Result<HtmlInputElement, JsValue> {
    query(document, selector)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("'{}' is not an input", selector)))
}

fn element(
    document: &Document,
    tag: &str,
    class: Option<&str>,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if let Some(class) = class {
        el.class_list().add_1(class)?;
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

fn action_button(
    document: &Document,
    label: &str,
    action: &str,
    id: Option<&str>,
) -> Result<Element, JsValue> {
    let button = element(document, "button", None, Some(label))?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-action", action)?;
    if let Some(id) = id {
        button.set_attribute("data-id", id)?;
    }
    Ok(button)
}

/// Replace the list contents with one box per card
pub fn render_list(document: &Document, cards: &[PostCard]) -> Result<(), JsValue> {
    let list = query(document, LIST)?;
    list.set_text_content(None);

    for card in cards {
        let id = card.id.to_string();
        let item = element(document, "div", Some("contentBox"), None)?;
        item.set_attribute("data-id", &id)?;

        let img = element(document, "img", None, None)?;
        img.set_attribute("src", &card.image)?;
        img.set_attribute("alt", "profile")?;
        item.append_child(&img)?;

        item.append_child(&element(document, "h3", None, Some(&card.nickname))?)?;
        item.append_child(&element(document, "h4", None, Some(&card.title))?)?;

        let summary = element(document, "p", Some("short-content"), Some(&card.summary))?;
        summary.set_attribute("data-action", Action::OPEN)?;
        summary.set_attribute("data-id", &id)?;
        item.append_child(&summary)?;

        item.append_child(&element(document, "div", Some("date"), Some(&card.date))?)?;
        list.append_child(&item)?;
    }

    log::debug!("Rendered {} posts", cards.len());
    Ok(())
}

/// Show the detail overlay, replacing any overlay already open
pub fn show_overlay(document: &Document, detail: &DetailView) -> Result<(), JsValue> {
    remove_overlay(document);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let id = detail.id.to_string();

    let popup = element(document, "div", Some("popup"), None)?;
    let content = element(document, "div", Some("popup-content"), None)?;
    content.append_child(&element(document, "h3", None, Some(&detail.nickname))?)?;
    content.append_child(&element(document, "h4", None, Some(&detail.title))?)?;
    content.append_child(&element(document, "p", None, Some(&detail.content))?)?;
    content.append_child(&action_button(document, messages::EDIT_BUTTON, Action::EDIT, Some(&id))?)?;
    content.append_child(&action_button(document, messages::DELETE_BUTTON, Action::DELETE, Some(&id))?)?;
    content.append_child(&action_button(document, messages::CLOSE_BUTTON, Action::CLOSE, None)?)?;
    popup.append_child(&content)?;

    body.append_child(&popup)?;
    Ok(())
}

/// Remove the overlay; returns whether one was present
pub fn remove_overlay(document: &Document) -> bool {
    match document.query_selector(OVERLAY) {
        Ok(Some(popup)) => {
            popup.remove();
            true
        }
        _ => false,
    }
}

/// Action attached to the clicked element, if any
pub fn clicked_action(event: &Event) -> Option<Action> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let el = target.closest("[data-action]").ok()??;
    let action = el.get_attribute("data-action")?;
    let id = el.get_attribute("data-id");
    Action::parse(&action, id.as_deref())
}

/// Object URL for the file chosen in the image input.
/// Only valid for this page session.
pub fn selected_image_url(document: &Document) -> Option<String> {
    let file = input(document, IMAGE_INPUT).ok()?.files()?.get(0)?;
    match Url::create_object_url_with_blob(&file) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("Could not create object URL: {:?}", e);
            None
        }
    }
}

/// Show the chosen file in the profile preview
pub fn preview_selected_image(document: &Document) -> Result<(), JsValue> {
    let Some(url) = selected_image_url(document) else {
        return Ok(());
    };
    let preview = query(document, PROFILE_IMAGE)?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| JsValue::from_str("profile preview is not an image"))?;
    revoke_image_url(&preview.src());
    preview.set_src(&url);
    Ok(())
}

/// Release an object URL made by [`selected_image_url`]; other URLs are left alone
pub fn revoke_image_url(url: &str) {
    if !post::is_object_url(url) {
        return;
    }
    if let Err(e) = Url::revoke_object_url(url) {
        log::warn!("Could not revoke object URL: {:?}", e);
    }
}

pub fn read_form(document: &Document) -> Result<PostForm, JsValue> {
    Ok(PostForm {
        nickname: input(document, NICKNAME_INPUT)?.value(),
        title: input(document, TITLE_INPUT)?.value(),
        content: input(document, CONTENT_INPUT)?.value(),
        image: selected_image_url(document),
    })
}

pub fn clear_form(document: &Document) -> Result<(), JsValue> {
    for selector in [NICKNAME_INPUT, TITLE_INPUT, CONTENT_INPUT, IMAGE_INPUT] {
        input(document, selector)?.set_value("");
    }
    Ok(())
}

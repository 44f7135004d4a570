//! Bulletin Board entry point
//!
//! Handles platform-specific initialization and wires page events to the
//! board controller.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Event};

    use bulletin_board::platform::{self, BrowserDialog, LocalStorage, dom};
    use bulletin_board::{Action, Board, BoardSettings, KeyValueStorage, MemoryStorage, PostId};

    /// Page state shared by all event handlers
    struct App {
        board: Board<Box<dyn KeyValueStorage>>,
        dialog: BrowserDialog,
        document: Document,
    }

    impl App {
        /// Redraw the list and bring the overlay in line with the view state
        fn render(&self) {
            let cards = self.board.cards(platform::utc_offset_minutes());
            if let Err(e) = dom::render_list(&self.document, &cards) {
                log::error!("Render failed: {:?}", e);
            }

            match self.board.detail() {
                Some(detail) => {
                    if let Err(e) = dom::show_overlay(&self.document, &detail) {
                        log::error!("Overlay failed: {:?}", e);
                    }
                }
                None => {
                    dom::remove_overlay(&self.document);
                }
            }
        }

        fn submit(&mut self) {
            let form = match dom::read_form(&self.document) {
                Ok(form) => form,
                Err(e) => {
                    log::error!("Could not read form: {:?}", e);
                    return;
                }
            };

            match self.board.submit(&form, &mut self.dialog, platform::now_millis()) {
                Ok(_) => {
                    self.render();
                    if let Err(e) = dom::clear_form(&self.document) {
                        log::warn!("Could not clear form: {:?}", e);
                    }
                }
                // The rejected post never got to keep its image
                Err(_) => {
                    if let Some(url) = &form.image {
                        dom::revoke_image_url(url);
                    }
                }
            }
        }

        fn open(&mut self, id: PostId) {
            match self.board.open_detail(id) {
                Ok(detail) => {
                    if let Err(e) = dom::show_overlay(&self.document, &detail) {
                        log::error!("Overlay failed: {:?}", e);
                    }
                }
                Err(e) => log::warn!("Cannot open post: {}", e),
            }
        }

        fn close(&mut self) {
            self.board.close_detail();
            dom::remove_overlay(&self.document);
        }

        fn handle(&mut self, action: Action) {
            match action {
                Action::Open(id) => self.open(id),
                Action::Close => self.close(),
                Action::Edit(id) => {
                    if self.board.edit_post(id, &mut self.dialog).is_ok() {
                        self.render();
                    }
                }
                Action::Delete(id) => {
                    if self.board.delete_post(id, &mut self.dialog).is_ok() {
                        self.render();
                    }
                }
            }
        }
    }

    fn open_storage() -> Box<dyn KeyValueStorage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; posts will not survive a reload", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bulletin Board starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let storage = open_storage();
        let settings = BoardSettings::load(storage.as_ref());
        let board = Board::load(storage, settings);

        let app = Rc::new(RefCell::new(App {
            board,
            dialog: BrowserDialog::new(window),
            document: document.clone(),
        }));

        app.borrow().render();

        setup_submit_button(&document, app.clone());
        setup_image_preview(&document);
        setup_click_actions(&document, app);

        log::info!("Bulletin Board ready");
    }

    fn setup_submit_button(document: &Document, app: Rc<RefCell<App>>) {
        let Ok(Some(btn)) = document.query_selector(dom::SUBMIT_BUTTON) else {
            log::error!("Submit button '{}' not found", dom::SUBMIT_BUTTON);
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            event.prevent_default();
            app.borrow_mut().submit();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_image_preview(document: &Document) {
        let Ok(Some(input)) = document.query_selector(dom::IMAGE_INPUT) else {
            log::warn!("Image input '{}' not found", dom::IMAGE_INPUT);
            return;
        };

        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            if let Err(e) = dom::preview_selected_image(&doc) {
                log::warn!("Image preview failed: {:?}", e);
            }
        });
        let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One delegated listener for list items and overlay buttons, so
    /// re-rendering never has to re-register handlers
    fn setup_click_actions(document: &Document, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            if let Some(action) = dom::clicked_action(&event) {
                log::debug!("Action: {:?}", action);
                app.borrow_mut().handle(action);
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use bulletin_board::{Board, BoardSettings, MemoryStorage, PostForm, ScriptedDialog};

    env_logger::init();
    log::info!("Bulletin Board (native) starting...");
    log::info!("The board runs in the browser - build with `trunk serve` for the web version");

    // Smoke run against in-memory storage
    let mut board = Board::load(MemoryStorage::new(), BoardSettings::default());
    let mut dialog = ScriptedDialog::new().text("demo");
    let form = PostForm::new("guest", "hello", "first post");
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default();

    match board.submit(&form, &mut dialog, now) {
        Ok(id) => println!("Created post {}", id),
        Err(e) => eprintln!("Submit failed: {}", e),
    }
    for card in board.cards(0) {
        println!("{} | {} | {} | {}", card.date, card.nickname, card.title, card.summary);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

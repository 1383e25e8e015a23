pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::{wire_input_handlers, InputWiring};

use crate::app::App;
use crate::constants::*;
use crate::dom;
use crate::input::KeyCommand;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Deck dots, the fullscreen close button, railway controls and the media overlay.
pub fn wire_buttons(document: &web::Document, app: &Rc<RefCell<App>>) {
    let count = app.borrow().deck().len();
    for i in 0..count {
        let app = app.clone();
        dom::add_click_listener(document, &format!("{DOT_ID_PREFIX}{i}"), move || {
            app.borrow_mut().navigate_to(i);
        });
    }

    let close_app = app.clone();
    let close_doc = document.clone();
    dom::add_click_listener(document, CLOSE_BUTTON_ID, move || {
        overlay::hide_media(&close_doc);
        close_app.borrow_mut().exit_fullscreen();
    });

    for (id, action) in RAILWAY_BUTTONS {
        let app = app.clone();
        dom::add_click_listener(document, id, move || {
            app.borrow_mut().command(KeyCommand::Scene(action));
        });
    }

    let media_doc = document.clone();
    dom::add_click_listener(document, MEDIA_OVERLAY_ID, move || {
        overlay::hide_media(&media_doc);
    });
}

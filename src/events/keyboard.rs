use crate::app::App;
use crate::audio;
use crate::dom;
use crate::input::{map_key, KeyCommand};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    app: &Rc<RefCell<App>>,
    audio_ctx: Option<&web::AudioContext>,
) {
    if let Some(ctx) = audio_ctx {
        audio::resume(ctx);
    }
    let key = ev.key();
    let fullscreen = app.borrow().deck().is_fullscreen();
    let Some(command) = map_key(&key, fullscreen) else {
        return;
    };
    if command == KeyCommand::ExitFullscreen {
        if let Some(doc) = dom::window_document() {
            overlay::hide_media(&doc);
        }
    }
    log::debug!("[keys] {key} -> {command:?}");
    app.borrow_mut().command(command);
    ev.prevent_default();
}

pub fn wire_global_keydown(app: Rc<RefCell<App>>, audio_ctx: Option<web::AudioContext>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app, audio_ctx.as_ref());
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

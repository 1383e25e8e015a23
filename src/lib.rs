#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use app::{App, DEFAULT_CARDS};
use constants::CANVAS_ID;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Pause the frame loop while the tab is hidden.
fn wire_visibility(document: &web::Document, app: Rc<RefCell<App>>) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let mut app = app.borrow_mut();
        if doc.hidden() {
            if app.stop() {
                log::info!("[frame] hidden, pausing");
            }
        } else if app.start() {
            log::info!("[frame] visible, resuming");
        }
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn create_audio() -> Option<web::AudioContext> {
    match web::AudioContext::new() {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            log::error!("[audio] AudioContext error: {:?}", e);
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cardstack-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_canvas_resize(&canvas);

    let seed: u64 = rand::random();
    let app = Rc::new(RefCell::new(App::new(&DEFAULT_CARDS, seed)?));
    {
        let (w, h) = (canvas.width(), canvas.height());
        app.borrow_mut().resize(w, h, dom::device_pixel_ratio());
        document.set_title(&app.borrow().deck().title());
    }
    overlay::set_active_dot(&document, app.borrow().deck().len(), 0);

    // Suspended until the first gesture resumes it.
    let audio_ctx = create_audio();

    events::wire_buttons(&document, &app);
    events::wire_global_keydown(app.clone(), audio_ctx.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        app: app.clone(),
        audio_ctx: audio_ctx.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app: app.clone(),
        canvas: canvas.clone(),
        document: document.clone(),
        audio_ctx,
        gpu,
        started: Instant::now(),
        size: (canvas.width(), canvas.height()),
    }));
    wire_visibility(&document, app);
    frame::start_loop(frame_ctx);

    Ok(())
}

use crate::app::{App, AppEvent};
use crate::audio;
use crate::dom;
use crate::overlay;
use crate::render;
use cardstack_core::{DeckEvent, SceneEvent};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::HUD_ID;

pub struct FrameContext<'a> {
    pub app: Rc<RefCell<App>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub audio_ctx: Option<web::AudioContext>,
    pub gpu: Option<render::GpuState<'a>>,
    pub started: Instant,
    pub size: (u32, u32),
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let size = (self.canvas.width(), self.canvas.height());
        if size != self.size {
            self.size = size;
            self.app
                .borrow_mut()
                .resize(size.0, size.1, dom::device_pixel_ratio());
            if let Some(g) = &mut self.gpu {
                g.resize_if_needed(size.0, size.1);
            }
        }

        let now = self.started.elapsed().as_secs_f64();
        let Some(events) = self.app.borrow_mut().tick(now) else {
            return;
        };
        for ev in events {
            self.handle_event(ev);
        }

        if let Some(g) = &mut self.gpu {
            if let Err(e) = self.app.borrow_mut().render(g) {
                log::error!("[gpu] render error: {:?}", e);
            }
        }
        self.sync_overlay();
    }

    fn handle_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::Deck(DeckEvent::NavigationStarted { from, to }) => {
                let app = self.app.borrow();
                let deck = app.deck();
                overlay::set_active_dot(&self.document, deck.len(), to);
                self.document.set_title(&deck.title());
                log::info!("[deck] showing {} (from {from})", to);
            }
            AppEvent::Deck(DeckEvent::NavigationFinished { current }) => {
                log::debug!("[deck] settled on {current}");
            }
            AppEvent::Deck(DeckEvent::FullscreenEntered { index }) => {
                log::info!("[deck] fullscreen {index}");
            }
            AppEvent::Deck(DeckEvent::FullscreenExited { index }) => {
                log::info!("[deck] closed {index}");
            }
            AppEvent::Scene { event, .. } => match event {
                SceneEvent::Horn => {
                    if let Some(ctx) = &self.audio_ctx {
                        if let Err(e) = audio::play_horn(ctx) {
                            log::error!("[audio] horn error: {:?}", e);
                        }
                    }
                }
                SceneEvent::Burst => overlay::burst(&self.document),
                SceneEvent::OpenMedia { slot } => overlay::show_media(&self.document, slot),
            },
        }
    }

    fn sync_overlay(&self) {
        let app = self.app.borrow();
        let deck = app.deck();
        overlay::set_fullscreen(&self.document, deck.is_fullscreen());
        overlay::apply_card_transform(&self.document, &app.card_transform());
        let preview = deck.preview();
        let title = preview
            .and_then(|(i, _)| deck.cards().get(i))
            .map(|k| k.title())
            .unwrap_or_default();
        overlay::apply_preview(&self.document, preview, title);
        let label = app.label().unwrap_or_default();
        overlay::set_text(&self.document, HUD_ID, &label);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drive `frame_ctx` from `requestAnimationFrame`. Frames are skipped while
/// the app's loop is stopped.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    frame_ctx.borrow().app.borrow_mut().start();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

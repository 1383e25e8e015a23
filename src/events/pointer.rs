use crate::app::App;
use crate::audio;
use crate::input;
use cardstack_core::{SceneInput, TouchPoints};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const WHEEL_LINE_PX: f32 = 16.0;
const WHEEL_PAGE_PX: f32 = 800.0;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<App>>,
    pub audio_ctx: Option<web::AudioContext>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_touch(&w);
}

#[inline]
fn canvas_px(canvas: &web::HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    input::css_to_canvas_px(
        Vec2::new(client_x, client_y),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    canvas_px(canvas, ev.client_x() as f32, ev.client_y() as f32)
}

fn touch_points(ev: &web::TouchEvent, canvas: &web::HtmlCanvasElement) -> TouchPoints {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| canvas_px(canvas, t.client_x() as f32, t.client_y() as f32))
        .collect()
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.pointer_type() == "touch" {
            return;
        }
        if let Some(ctx) = &w.audio_ctx {
            audio::resume(ctx);
        }
        let pos = pointer_canvas_px(&ev, &w.canvas);
        w.app
            .borrow_mut()
            .handle_input(&SceneInput::PointerDown { pos });
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.pointer_type() == "touch" {
            return;
        }
        let pos = pointer_canvas_px(&ev, &w.canvas);
        w.app
            .borrow_mut()
            .handle_input(&SceneInput::PointerMove { pos });
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.pointer_type() == "touch" {
            return;
        }
        let pos = pointer_canvas_px(&ev, &w.canvas);
        w.app.borrow_mut().handle_input(&SceneInput::PointerUp { pos });
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let scale = match ev.delta_mode() {
            web::WheelEvent::DOM_DELTA_LINE => WHEEL_LINE_PX,
            web::WheelEvent::DOM_DELTA_PAGE => WHEEL_PAGE_PX,
            _ => 1.0,
        };
        let delta_y = ev.delta_y() as f32 * scale;
        w.app.borrow_mut().handle_input(&SceneInput::Wheel { delta_y });
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touch(w: &InputWiring) {
    for name in ["touchstart", "touchmove", "touchend", "touchcancel"] {
        let w = w.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
                let points = touch_points(&ev, &w.canvas);
                let input = match ev.type_().as_str() {
                    "touchstart" => {
                        if let Some(ctx) = &w.audio_ctx {
                            audio::resume(ctx);
                        }
                        SceneInput::TouchStart { points }
                    }
                    "touchmove" => SceneInput::TouchMove { points },
                    _ => SceneInput::TouchEnd,
                };
                let mut app = w.app.borrow_mut();
                if ev.type_() == "touchcancel" {
                    app.cancel_tap();
                }
                app.handle_input(&input);
                ev.prevent_default();
            }) as Box<dyn FnMut(_)>);
        _ = w
            .canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

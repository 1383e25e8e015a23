use crate::constants::*;
use crate::dom;
use cardstack_core::{CardTransform, PreviewTransform};
use web_sys as web;

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Current card: parallax translate, depth push and drop shadow.
pub fn apply_card_transform(document: &web::Document, t: &CardTransform) {
    if let Some(el) = dom::html_element(document, CARD_ID) {
        let style = el.style();
        _ = style.set_property(
            "transform",
            &format!(
                "translate3d({:.2}px, {:.2}px, {:.2}px) scale({:.4})",
                t.translate.x, t.translate.y, t.z, t.scale
            ),
        );
        _ = style.set_property(
            "box-shadow",
            &format!(
                "{:.1}px {:.1}px 80px rgba(0, 0, 0, 0.35)",
                t.shadow.x, t.shadow.y
            ),
        );
    }
}

pub fn apply_preview(document: &web::Document, preview: Option<(usize, PreviewTransform)>, title: &str) {
    let Some(el) = dom::html_element(document, PREVIEW_ID) else {
        return;
    };
    let style = el.style();
    match preview {
        Some((_, p)) => {
            _ = style.set_property(
                "transform",
                &format!(
                    "translate3d(0, {:.2}%, {:.2}px) scale({:.4})",
                    p.y_percent, p.z, p.scale
                ),
            );
            _ = style.set_property("opacity", &format!("{:.3}", p.opacity));
            set_text(document, PREVIEW_ID, title);
        }
        None => {
            _ = style.set_property("opacity", "0");
        }
    }
}

pub fn set_fullscreen(document: &web::Document, on: bool) {
    if let Some(el) = document.get_element_by_id(CARD_ID) {
        let cl = el.class_list();
        _ = if on {
            cl.add_1(FULLSCREEN_CLASS)
        } else {
            cl.remove_1(FULLSCREEN_CLASS)
        };
    }
}

pub fn set_active_dot(document: &web::Document, count: usize, current: usize) {
    for i in 0..count {
        if let Some(el) = document.get_element_by_id(&format!("{DOT_ID_PREFIX}{i}")) {
            _ = el.class_list().toggle_with_force("active", i == current);
        }
    }
}

/// Restart the celebration animation on the burst element.
pub fn burst(document: &web::Document) {
    if let Some(el) = dom::html_element(document, BURST_ID) {
        let cl = el.class_list();
        _ = cl.remove_1("active");
        // reading layout restarts the CSS animation
        _ = el.offset_width();
        _ = cl.add_1("active");
    }
}

pub fn show_media(document: &web::Document, slot: usize) {
    if let Some(el) = document.get_element_by_id(MEDIA_OVERLAY_ID) {
        _ = el.set_attribute("data-slot", &slot.to_string());
        _ = el.class_list().remove_1("hidden");
        set_text(document, MEDIA_OVERLAY_ID, &format!("Media {}", slot + 1));
    }
}

pub fn hide_media(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(MEDIA_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
    }
}

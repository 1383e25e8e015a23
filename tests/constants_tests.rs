// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use cardstack_core::constants as kin;
use constants::*;
use std::collections::HashSet;

#[test]
#[allow(clippy::assertions_on_constants)]
fn core_ranges_are_ordered() {
    assert!(kin::ORBIT_PHI_MIN < kin::ORBIT_PHI_MAX);
    assert!(kin::ORBIT_PHI_MAX < std::f32::consts::FRAC_PI_2);
    assert!(kin::ORBIT_RADIUS_MIN < kin::ORBIT_RADIUS_MAX);
    assert!(kin::ORBIT_DEFAULT_RADIUS >= kin::ORBIT_RADIUS_MIN);
    assert!(kin::ORBIT_DEFAULT_RADIUS <= kin::ORBIT_RADIUS_MAX);
    assert!(kin::STAIR_INNER_RADIUS < kin::STAIR_OUTER_RADIUS);
    assert!(kin::STAIR_BURST_REARM_BELOW < kin::STAIR_BURST_AT);
    assert!(kin::STAIR_BURST_AT <= kin::SCROLL_MAX);
    assert!(kin::TRAIN_SPEED_SLOW < kin::TRAIN_SPEED_FAST);
    assert!(kin::TRAIN_START_WAGONS <= kin::TRAIN_MAX_WAGONS);
    assert!(kin::SKY_SPAWN_DIST < kin::SKY_DESPAWN_DIST);
}

#[test]
fn smoothing_factors_are_fractions() {
    for f in [
        kin::DECK_SMOOTHING,
        kin::DECK_PREVIEW_SMOOTHING,
        kin::STAIR_SCROLL_SMOOTHING,
        kin::FORMATION_SCROLL_SMOOTHING,
        kin::FORMATION_NODE_SMOOTHING,
        kin::ORBIT_THETA_SMOOTHING,
        kin::ORBIT_PHI_SMOOTHING,
        kin::ORBIT_RADIUS_SMOOTHING,
        kin::SHEEP_TURN_SMOOTHING,
    ] {
        assert!(f > 0.0 && f < 1.0, "factor {f}");
    }
}

#[test]
fn picture_frames_sit_on_existing_steps() {
    for step in kin::STAIR_FRAME_STEPS {
        assert!(step < kin::STAIR_COUNT, "step {step}");
    }
}

#[test]
fn railway_buttons_are_distinct() {
    let ids: HashSet<_> = RAILWAY_BUTTONS.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids.len(), RAILWAY_BUTTONS.len());
    for (i, (_, a)) in RAILWAY_BUTTONS.iter().enumerate() {
        for (_, b) in &RAILWAY_BUTTONS[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn horn_pattern_notes_do_not_overlap() {
    for pair in HORN_PATTERN.windows(2) {
        let (start, dur) = pair[0];
        let (next, _) = pair[1];
        assert!(start + dur <= next, "note at {start} runs into {next}");
    }
    for (_, dur) in HORN_PATTERN {
        assert!(dur > HORN_ATTACK_SEC + HORN_RELEASE_SEC);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn horn_voicing_is_quiet_and_ordered() {
    assert!(HORN_SUB_GAIN < HORN_GAIN);
    assert!(HORN_GAIN * (HORN_CHORD_HZ.len() as f32) < 1.0);
    for pair in HORN_CHORD_HZ.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(HORN_LOWPASS_HZ > HORN_CHORD_HZ[HORN_CHORD_HZ.len() - 1]);
    assert!(HORN_DETUNE_START < 1.0);
}

#[test]
fn dom_ids_are_unique() {
    let ids = [
        CANVAS_ID,
        CARD_ID,
        PREVIEW_ID,
        HUD_ID,
        BURST_ID,
        MEDIA_OVERLAY_ID,
        CLOSE_BUTTON_ID,
    ];
    let set: HashSet<_> = ids.iter().collect();
    assert_eq!(set.len(), ids.len());
}

use crate::constants::*;
use wasm_bindgen::JsValue;
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32) -> Result<web::GainNode, JsValue> {
    let g = web::GainNode::new(audio_ctx)?;
    g.gain().set_value(value);
    Ok(g)
}

/// Shared low-pass the horn voices play through.
fn horn_bus(audio_ctx: &web::AudioContext) -> Result<web::BiquadFilterNode, JsValue> {
    let filter = web::BiquadFilterNode::new(audio_ctx)?;
    filter.set_type(web::BiquadFilterType::Lowpass);
    filter.frequency().set_value(HORN_LOWPASS_HZ);
    filter.q().set_value(HORN_LOWPASS_Q);
    filter.connect_with_audio_node(&audio_ctx.destination())?;
    Ok(filter)
}

/// One enveloped oscillator from `t0` for `dur` seconds.
fn horn_voice(
    audio_ctx: &web::AudioContext,
    dest: &web::AudioNode,
    kind: web::OscillatorType,
    freq: f32,
    peak: f32,
    t0: f64,
    dur: f64,
) -> Result<(), JsValue> {
    let osc = web::OscillatorNode::new(audio_ctx)?;
    osc.set_type(kind);
    osc.frequency()
        .set_value_at_time(freq * HORN_DETUNE_START, t0)?;
    osc.frequency()
        .linear_ramp_to_value_at_time(freq, t0 + HORN_GLIDE_SEC)?;

    let env = create_gain(audio_ctx, 0.0)?;
    let g = env.gain();
    g.set_value_at_time(0.0, t0)?;
    g.linear_ramp_to_value_at_time(peak, t0 + HORN_ATTACK_SEC)?;
    g.set_value_at_time(peak, t0 + (dur - HORN_RELEASE_SEC).max(HORN_ATTACK_SEC))?;
    g.linear_ramp_to_value_at_time(0.0, t0 + dur)?;

    osc.connect_with_audio_node(&env)?;
    env.connect_with_audio_node(dest)?;
    osc.start_with_when(t0)?;
    osc.stop_with_when(t0 + dur + 0.05)?;
    Ok(())
}

/// Schedule the station horn: a sawtooth chord with triangle sub-octaves,
/// sounded long-short-short-long.
pub fn play_horn(audio_ctx: &web::AudioContext) -> Result<(), JsValue> {
    let bus = horn_bus(audio_ctx)?;
    let now = audio_ctx.current_time() + 0.02;
    for (offset, dur) in HORN_PATTERN {
        let t0 = now + offset;
        for freq in HORN_CHORD_HZ {
            horn_voice(
                audio_ctx,
                &bus,
                web::OscillatorType::Sawtooth,
                freq,
                HORN_GAIN,
                t0,
                dur,
            )?;
            horn_voice(
                audio_ctx,
                &bus,
                web::OscillatorType::Triangle,
                freq * 0.5,
                HORN_SUB_GAIN,
                t0,
                dur,
            )?;
        }
    }
    Ok(())
}

pub fn resume(audio_ctx: &web::AudioContext) {
    if audio_ctx.state() == web::AudioContextState::Suspended {
        _ = audio_ctx.resume();
    }
}

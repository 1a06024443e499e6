use crate::constants::*;
use crate::core::{midi_to_hz, note_to_midi, Synth};
use anyhow::anyhow;
use fnv::FnvHashMap;
use web_sys as web;

/// One sounding oscillator and its envelope.
struct Voice {
    osc: web::OscillatorNode,
    env: web::GainNode,
}

/// Polyphonic triangle synth on WebAudio with a short procedural reverb send.
///
/// Routing: voice env -> master -> destination, and master -> convolver ->
/// reverb wet -> destination.
pub struct WebSynth {
    ctx: web::AudioContext,
    master: web::GainNode,
    voices: FnvHashMap<&'static str, Voice>,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(|e| anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn build_reverb(ctx: &web::AudioContext) -> anyhow::Result<web::ConvolverNode> {
    let reverb =
        web::ConvolverNode::new(ctx).map_err(|e| anyhow!("ConvolverNode error: {:?}", e))?;
    reverb.set_normalize(true);
    let sr = ctx.sample_rate();
    let len = (sr * REVERB_SECONDS) as u32;
    let ir = ctx
        .create_buffer(2, len.max(1), sr)
        .map_err(|e| anyhow!("impulse buffer error: {:?}", e))?;
    // xorshift32 noise under an exponential decay, one seed per channel
    let mut seeds: [u32; 2] = [0x1234_ABCD, 0x7890_FEDC];
    let dt = 1.0 / sr;
    for (ch, seed) in seeds.iter_mut().enumerate() {
        let mut buf: Vec<f32> = Vec::with_capacity(len as usize);
        for i in 0..len {
            let mut x = *seed;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            *seed = x;
            let n = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let t = i as f32 * dt;
            buf.push(n * (-t * 4.0 / REVERB_SECONDS).exp());
        }
        ir.copy_to_channel(&mut buf, ch as i32)
            .map_err(|e| anyhow!("impulse copy error: {:?}", e))?;
    }
    reverb.set_buffer(Some(&ir));
    Ok(reverb)
}

fn link(a: &web::AudioNode, b: &web::AudioNode, what: &str) -> anyhow::Result<()> {
    a.connect_with_audio_node(b)
        .map(|_| ())
        .map_err(|e| anyhow!("connect {} error: {:?}", what, e))
}

impl WebSynth {
    pub fn new(ctx: web::AudioContext) -> anyhow::Result<Self> {
        let master = create_gain(&ctx, SYNTH_MASTER_GAIN, "Master")?;
        let reverb = build_reverb(&ctx)?;
        let reverb_wet = create_gain(&ctx, REVERB_WET, "Reverb wet")?;
        let dest = ctx.destination();
        link(&master, &dest, "master")?;
        link(&master, &reverb, "reverb send")?;
        link(&reverb, &reverb_wet, "reverb")?;
        link(&reverb_wet, &dest, "reverb wet")?;
        log::info!("[audio] synth graph built at {} Hz", ctx.sample_rate());
        Ok(Self {
            ctx,
            master,
            voices: FnvHashMap::default(),
        })
    }

    /// Close the context; the synth is unusable afterwards.
    pub fn close(&self) {
        _ = self.ctx.close();
    }

    fn start_voice(&self, frequency_hz: f32) -> Result<Voice, wasm_bindgen::JsValue> {
        let osc = web::OscillatorNode::new(&self.ctx)?;
        osc.set_type(web::OscillatorType::Triangle);
        osc.frequency().set_value(frequency_hz);
        let env = web::GainNode::new(&self.ctx)?;
        let t0 = self.ctx.current_time();
        let gain = env.gain();
        gain.set_value_at_time(0.0, t0)?;
        gain.linear_ramp_to_value_at_time(SYNTH_VOICE_PEAK, t0 + SYNTH_ATTACK_SEC)?;
        gain.linear_ramp_to_value_at_time(
            SYNTH_VOICE_PEAK * SYNTH_SUSTAIN_LEVEL,
            t0 + SYNTH_ATTACK_SEC + SYNTH_DECAY_SEC,
        )?;
        osc.connect_with_audio_node(&env)?;
        env.connect_with_audio_node(&self.master)?;
        osc.start_with_when(t0)?;
        Ok(Voice { osc, env })
    }

    fn release_voice(&self, voice: Voice) {
        let t = self.ctx.current_time();
        let gain = voice.env.gain();
        let held = gain.value();
        _ = gain.cancel_scheduled_values(t);
        _ = gain.set_value_at_time(held, t);
        _ = gain.linear_ramp_to_value_at_time(0.0, t + SYNTH_RELEASE_SEC);
        _ = voice.osc.stop_with_when(t + SYNTH_RELEASE_SEC + 0.05);
    }
}

impl Synth for WebSynth {
    fn trigger_attack(&mut self, note: &'static str) {
        if let Some(prev) = self.voices.remove(note) {
            self.release_voice(prev);
        }
        let Some(midi) = note_to_midi(note) else {
            log::warn!("[audio] cannot parse note {}", note);
            return;
        };
        match self.start_voice(midi_to_hz(midi as f32)) {
            Ok(v) => {
                self.voices.insert(note, v);
            }
            Err(e) => log::error!("[audio] voice start error for {}: {:?}", note, e),
        }
    }

    fn trigger_release(&mut self, note: &'static str) {
        if let Some(v) = self.voices.remove(note) {
            self.release_voice(v);
        }
    }
}

//! Tiny tone synthesizer for the interaction cues: a frequency glide with a
//! fast attack and an exponential-style decay, rendered to 16-bit mono WAV
//! bytes the audio layer turns into playable assets.

pub const SAMPLE_RATE: u32 = 44_100;
/// Linear attack length, seconds.
const ATTACK_SECS: f32 = 0.01;
/// The decay aims at this floor by the end of the clip.
const RELEASE_FLOOR: f32 = 0.01;

/// One frequency sweep. `start_hz == end_hz` is a plain beep.
#[derive(Clone, Copy, Debug)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    pub seconds: f32,
    pub peak: f32,
}

impl Tone {
    pub const fn sweep(start_hz: f32, end_hz: f32, seconds: f32, peak: f32) -> Self {
        Self {
            start_hz,
            end_hz,
            seconds,
            peak,
        }
    }
}

/// Renders a tone to mono samples in [-1, 1].
pub fn render_tone(tone: &Tone) -> Vec<f32> {
    let count = (tone.seconds * SAMPLE_RATE as f32).round().max(1.0) as usize;
    let mut samples = Vec::with_capacity(count);
    let dt = 1.0 / SAMPLE_RATE as f32;
    let mut phase = 0.0f32;

    for i in 0..count {
        let t = i as f32 * dt;
        let frac = t / tone.seconds;
        // Exponential glide between the endpoint frequencies.
        let freq = tone.start_hz * (tone.end_hz / tone.start_hz).powf(frac);
        phase += std::f32::consts::TAU * freq * dt;

        let envelope = if t < ATTACK_SECS {
            tone.peak * (t / ATTACK_SECS)
        } else {
            let decay_frac = (t - ATTACK_SECS) / (tone.seconds - ATTACK_SECS).max(dt);
            tone.peak * (RELEASE_FLOOR / tone.peak).powf(decay_frac)
        };

        samples.push(phase.sin() * envelope);
    }
    samples
}

/// Renders a note sequence: one tone per note frequency, each `note_secs`
/// long, started every `note_spacing_secs` and mixed additively where they
/// overlap.
pub fn render_arpeggio(notes: &[f32], note_secs: f32, note_spacing_secs: f32, peak: f32) -> Vec<f32> {
    if notes.is_empty() {
        return Vec::new();
    }
    let total_secs = note_spacing_secs * (notes.len() - 1) as f32 + note_secs;
    let mut mix = vec![0.0f32; (total_secs * SAMPLE_RATE as f32).ceil() as usize];

    for (index, &freq) in notes.iter().enumerate() {
        let tone = Tone::sweep(freq, freq, note_secs, peak);
        let offset = (note_spacing_secs * index as f32 * SAMPLE_RATE as f32) as usize;
        for (i, sample) in render_tone(&tone).into_iter().enumerate() {
            if let Some(slot) = mix.get_mut(offset + i) {
                *slot = (*slot + sample).clamp(-1.0, 1.0);
            }
        }
    }
    mix
}

/// Encodes mono samples as a 16-bit PCM WAV file.
pub fn wav_bytes(samples: &[f32]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

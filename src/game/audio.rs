use std::collections::HashMap;

use bevy::audio::AudioSource;
use bevy::prelude::*;

use crate::config::ArcadeConfig;
use crate::minigame::synth::{self, Tone};

use super::UpdateSet;

pub struct SoundPlugin;

/// Everything that can chirp. Each cue maps to one pre-synthesized clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Cue {
    Hover,
    Click,
    KeyLow,
    KeyMid,
    KeyHigh,
    KeyCycle,
    Eat,
    Shoot,
    Hit,
    Transition,
    ModeSwitch,
    Complete,
}

impl Cue {
    pub(crate) fn for_key(key: KeyCode) -> Option<Cue> {
        match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Cue::KeyLow),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Cue::KeyMid),
            KeyCode::Space | KeyCode::ArrowUp | KeyCode::KeyW => Some(Cue::KeyHigh),
            KeyCode::KeyG => Some(Cue::KeyCycle),
            _ => None,
        }
    }
}

#[derive(Message, Clone, Copy)]
pub(crate) struct PlayCue(pub(crate) Cue);

/// Clip bank, or the null object: with audio disabled (or nothing
/// synthesized) the map stays empty and every cue is silently skipped.
#[derive(Resource, Default)]
struct SoundBank {
    clips: HashMap<Cue, Handle<AudioSource>>,
}

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayCue>()
            .init_resource::<SoundBank>()
            .add_systems(Startup, synthesize_clips)
            .add_systems(Update, play_cues.in_set(UpdateSet::Visuals));
    }
}

fn synthesize_clips(
    config: Res<ArcadeConfig>,
    mut bank: ResMut<SoundBank>,
    mut sources: ResMut<Assets<AudioSource>>,
) {
    if !config.audio_enabled {
        info!("audio disabled, cues will be silent");
        return;
    }

    let sweeps = [
        (Cue::Hover, Tone::sweep(800.0, 1200.0, 0.1, 0.1)),
        (Cue::Click, Tone::sweep(1000.0, 500.0, 0.05, 0.15)),
        (Cue::KeyLow, Tone::sweep(400.0, 400.0, 0.1, 0.1)),
        (Cue::KeyMid, Tone::sweep(600.0, 600.0, 0.1, 0.1)),
        (Cue::KeyHigh, Tone::sweep(800.0, 800.0, 0.15, 0.1)),
        (Cue::KeyCycle, Tone::sweep(1000.0, 1000.0, 0.2, 0.1)),
        (Cue::Eat, Tone::sweep(800.0, 1200.0, 0.1, 0.1)),
        (Cue::Shoot, Tone::sweep(200.0, 100.0, 0.05, 0.1)),
        (Cue::Hit, Tone::sweep(400.0, 200.0, 0.1, 0.15)),
        (Cue::Transition, Tone::sweep(400.0, 800.0, 0.2, 0.1)),
    ];
    for (cue, tone) in sweeps {
        let clip = synth::wav_bytes(&synth::render_tone(&tone));
        bank.clips.insert(cue, sources.add(AudioSource { bytes: clip.into() }));
    }

    // Rising arpeggios: C5 E5 G5 C6 for a mode switch, two more steps on top
    // for the full clear.
    let switch = synth::render_arpeggio(&[523.0, 659.0, 784.0, 1047.0], 0.2, 0.2, 0.2);
    bank.clips.insert(
        Cue::ModeSwitch,
        sources.add(AudioSource {
            bytes: synth::wav_bytes(&switch).into(),
        }),
    );
    let complete =
        synth::render_arpeggio(&[523.0, 659.0, 784.0, 1047.0, 1319.0, 1568.0], 0.3, 0.15, 0.15);
    bank.clips.insert(
        Cue::Complete,
        sources.add(AudioSource {
            bytes: synth::wav_bytes(&complete).into(),
        }),
    );
}

fn play_cues(mut commands: Commands, mut cues: MessageReader<PlayCue>, bank: Res<SoundBank>) {
    for &PlayCue(cue) in cues.read() {
        let Some(clip) = bank.clips.get(&cue) else {
            continue;
        };
        commands.spawn((AudioPlayer(clip.clone()), PlaybackSettings::DESPAWN));
    }
}

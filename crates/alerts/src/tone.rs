//! Alert tone synthesis and playback.
//!
//! The alert sound is a short synthesized sine burst rather than an
//! audio asset, so the station works with nothing on disk. Synthesis
//! is a pure function over a [`ToneSpec`]; playback goes through the
//! default cpal output device and blocks the calling thread for the
//! tone's duration.

use std::f32::consts::TAU;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Output sample rate used for synthesis and playback.
pub const SAMPLE_RATE: u32 = 44_100;

/// The emergency alert tone: an 880 Hz burst with a short gain ramp
/// on both ends to avoid clicks.
pub const ALERT_TONE: ToneSpec = ToneSpec {
    frequency_hz: 880.0,
    amplitude: 0.4,
    duration_ms: 800,
    ramp_ms: 20,
};

/// Near-silent blip played once by the unlock gate purely to activate
/// the audio subsystem for the session.
pub const UNLOCK_TONE: ToneSpec = ToneSpec {
    frequency_hz: 440.0,
    amplitude: 0.001,
    duration_ms: 50,
    ramp_ms: 5,
};

/// Parameters of one synthesized tone.
#[derive(Debug, Clone, Copy)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    /// Peak gain in `[0, 1]`.
    pub amplitude: f32,
    pub duration_ms: u32,
    /// Linear attack/release ramp applied at both ends.
    pub ramp_ms: u32,
}

impl ToneSpec {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

/// Errors from the audio output path.
#[derive(Debug, thiserror::Error)]
pub enum ToneError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("audio stream error: {0}")]
    Stream(String),
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Render a tone to mono f32 samples.
pub fn synthesize(spec: &ToneSpec, sample_rate: u32) -> Vec<f32> {
    let total = (u64::from(sample_rate) * u64::from(spec.duration_ms) / 1000) as usize;
    let ramp = (u64::from(sample_rate) * u64::from(spec.ramp_ms) / 1000) as usize;

    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / sample_rate as f32;
        let mut gain = spec.amplitude;
        if ramp > 0 {
            if i < ramp {
                gain *= i as f32 / ramp as f32;
            } else if total - i < ramp {
                gain *= (total - i) as f32 / ramp as f32;
            }
        }
        samples.push(gain * (TAU * spec.frequency_hz * t).sin());
    }
    samples
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

/// Play a tone through the default output device, blocking until it
/// finishes. Fails fast when no device exists or the stream cannot be
/// built, which is how a locked/absent audio subsystem manifests.
pub fn play(spec: &ToneSpec) -> Result<(), ToneError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(ToneError::NoOutputDevice)?;

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };

    let samples = synthesize(spec, SAMPLE_RATE);
    let total = samples.len();
    let mut pos = 0usize;

    let stream = device
        .build_output_stream(
            &config,
            move |out: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for slot in out.iter_mut() {
                    *slot = if pos < total { samples[pos] } else { 0.0 };
                    pos = pos.saturating_add(1);
                }
            },
            |err| tracing::warn!(error = %err, "Audio stream error"),
            None,
        )
        .map_err(|e| ToneError::Stream(e.to_string()))?;

    stream
        .play()
        .map_err(|e| ToneError::Stream(e.to_string()))?;

    // Give the device a little slack past the nominal duration so the
    // release ramp is not cut off.
    std::thread::sleep(spec.duration() + Duration::from_millis(50));
    drop(stream);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

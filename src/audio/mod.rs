//! Audio path for the collar alert
//!
//! Architecture:
//! - Synthesizer: exact sine, one sample per index, no state
//! - Player: drives one synthesis cursor into the sink, frame by frame
//! - Sink: blocking write, back-pressure paces the whole loop
//! - PCM5102 via I2S @ 44.1 kHz, 16-bit stereo

pub mod frame;
pub mod player;
pub mod sink;
pub mod synth;

pub use frame::{Frame, MAX_AMPLITUDE};
pub use player::{AlertPlayer, PlaybackReport};
pub use sink::{AudioSink, WriteWait};
pub use synth::{Samples, SynthesisState, WaveformSynthesizer};

//! Audio sink contract
//!
//! The sink is the output peripheral (I2S + DMA on the collar). It accepts
//! whole stereo frames in order and blocks while its buffering is full.
//! That blocking write is the only suspension point in the alert path.

use super::frame::Frame;
use crate::config::SinkConfig;
use crate::error::SinkError;

/// Maximum time `write_frame` may wait for buffer space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteWait {
    /// Block until the frame is accepted.
    #[default]
    Forever,
    /// Give up with [`SinkError::Timeout`] after this many milliseconds.
    Millis(u32),
}

/// Streaming audio output.
///
/// Implementations are created already initialized (`initialize` on the
/// concrete type takes a [`SinkConfig`]); the owned value is the handle.
pub trait AudioSink {
    /// Configuration the peripheral was initialized with.
    fn config(&self) -> &SinkConfig;

    /// Queue one frame, blocking up to `wait` for buffer space.
    ///
    /// A frame is either accepted whole or rejected with an error. After
    /// an error no partial frame may stay queued: the next accepted frame
    /// must start on the left channel.
    fn write_frame(&mut self, frame: Frame, wait: WriteWait) -> Result<(), SinkError>;
}

impl<S: AudioSink + ?Sized> AudioSink for &mut S {
    #[inline]
    fn config(&self) -> &SinkConfig {
        (**self).config()
    }

    #[inline]
    fn write_frame(&mut self, frame: Frame, wait: WriteWait) -> Result<(), SinkError> {
        (**self).write_frame(frame, wait)
    }
}

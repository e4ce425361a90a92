//! Stereo frame type

/// Largest sample magnitude. The usable range is symmetric,
/// `-MAX_AMPLITUDE..=MAX_AMPLITUDE`, so `i16::MIN` never appears.
pub const MAX_AMPLITUDE: i16 = i16::MAX;

/// One stereo pair as delivered to the sink.
///
/// Wire form: 16-bit little-endian left word, then right word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    /// Duplicate a mono sample into both channels.
    #[inline]
    pub const fn mono(sample: i16) -> Self {
        Self {
            left: sample,
            right: sample,
        }
    }

    /// True if left and right carry the same sample.
    #[inline]
    pub fn is_mono(&self) -> bool {
        self.left == self.right
    }

    /// Serialize for the I2S DMA buffer.
    #[inline]
    pub fn to_le_bytes(self) -> [u8; 4] {
        let l = self.left.to_le_bytes();
        let r = self.right.to_le_bytes();
        [l[0], l[1], r[0], r[1]]
    }
}

/// Decoded audio: interleaved PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        debug_assert!(channels > 0, "an audio clip needs at least one channel");
        debug_assert_eq!(
            samples.len() % channels as usize,
            0,
            "sample count must be a multiple of the channel count"
        );
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Interleave equal-length per-channel buffers.
    pub fn from_channels(channels: &[Vec<f32>], sample_rate: u32) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        let mut samples = Vec::with_capacity(frames * channels.len());
        for i in 0..frames {
            for channel in channels {
                samples.push(channel[i]);
            }
        }
        Self::new(samples, sample_rate, channels.len() as u16)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// De-interleave into one buffer per channel.
    pub fn split_channels(&self) -> Vec<Vec<f32>> {
        let n = self.channels as usize;
        (0..n)
            .map(|c| self.samples.iter().skip(c).step_by(n).copied().collect())
            .collect()
    }
}

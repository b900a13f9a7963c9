//! WAV file reading and writing, one buffer per channel.

use std::path::Path;

use anyhow::{Context, bail};
use hound::{SampleFormat, WavReader, WavWriter};

/// Decoded audio, deinterleaved.
#[derive(Debug, Clone)]
pub struct Audio {
    /// One buffer per channel, all the same length.
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth of the source file.
    pub bits_per_sample: u16,
}

impl Audio {
    /// Number of sample frames.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}

/// Read a WAV file, converting integer PCM to `[-1, 1)`.
pub fn read_wav(path: &Path) -> anyhow::Result<Audio> {
    let reader =
        WavReader::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let spec = reader.spec();
    let num_channels = usize::from(spec.channels);
    if num_channels == 0 {
        bail!("{} has no channels", path.display());
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / num_channels;
    let mut channels = vec![Vec::with_capacity(frames); num_channels];
    for frame in interleaved.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(Audio {
        channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
    })
}

/// Write deinterleaved audio. 32-bit output is float, other depths integer.
pub fn write_wav(path: &Path, audio: &Audio) -> anyhow::Result<()> {
    let bits = audio.bits_per_sample;
    let spec = hound::WavSpec {
        channels: u16::try_from(audio.channels.len()).context("too many channels")?,
        sample_rate: audio.sample_rate,
        bits_per_sample: bits,
        sample_format: if bits == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer =
        WavWriter::create(path, spec).with_context(|| format!("cannot create {}", path.display()))?;

    let max_val = (1i64 << (bits - 1)) as f32;
    for frame in 0..audio.frames() {
        for channel in &audio.channels {
            let sample = channel[frame];
            if bits == 32 {
                writer.write_sample(sample)?;
            } else {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between an audio host and a processor.
//! Effects process mono `f32` audio either one sample at a time or in
//! blocks, and report how many samples a block call consumed.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: Single `f32` input/output. Multi-channel hosts run
//!   one independent instance per channel.
//!
//! - **Object-safe**: `dyn Effect` works for runtime selection; generic
//!   dispatch is preferred on the hot path.
//!
//! - **No allocations**: All methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use rasp_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// let mut out = [0.0; 2];
/// assert_eq!(gain.process_block(&[1.0, -1.0], &mut out), 2);
/// assert_eq!(out, [0.5, -0.5]);
/// ```
pub trait Effect {
    /// Process a single sample.
    ///
    /// For effects with internal state (filters, counters), this advances the
    /// state by one sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples and return the number processed.
    ///
    /// The returned count always equals `input.len()`; there is no partial
    /// processing.
    ///
    /// # Panics
    /// Panics if `input.len() != output.len()`. Equal-length buffers are part
    /// of the caller contract.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
        input.len()
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate and re-derive sample-rate dependent state.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state without changing parameters.
    fn reset(&mut self);

    /// Report processing latency in samples. Default returns 0.
    fn latency_samples(&self) -> usize {
        0
    }
}

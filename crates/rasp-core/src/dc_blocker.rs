//! DC blocking filter for removing DC offset from audio signals.
//!
//! Subtracts a rolling average of the most recent input samples from the
//! current sample. A rolling average leaves less offset at stream start than
//! a first-order IIR blocker, which matters after asymmetric waveshaping
//! (rectifiers, even-harmonic curves) where the bias appears immediately.
//!
//! Window length is a fixed 50 ms: `N = floor(sample_rate / 20)`.
//!
//! ```text
//! sum[n] = sum[n-1] + x[n] - x[n-N]
//! y[n]   = x[n] - sum[n] / min(n+1, N)
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::collections::VecDeque;

/// Moving-average DC blocking filter.
///
/// Keeps a FIFO of the last `N` input samples and a running sum so the mean
/// is available in O(1) per sample. The sum is held in `f64` to avoid drift
/// over long streams of `f32` input.
///
/// The FIFO is reserved on construction and on sample-rate changes, so
/// [`process`](Self::process) never allocates.
///
/// ## Example
///
/// ```rust
/// use rasp_core::DcBlocker;
///
/// let mut blocker = DcBlocker::new(48000.0);
/// assert_eq!(blocker.window_len(), 2400);
///
/// let mut output = 1.0;
/// for _ in 0..4800 {
///     output = blocker.process(0.25);
/// }
/// assert!(output.abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct DcBlocker {
    /// Most recent input samples, oldest at the front
    history: VecDeque<f32>,
    /// Running sum of `history`
    total: f64,
    /// Maximum FIFO length in samples
    window: usize,
}

impl DcBlocker {
    /// Averaging window divisor: `sample_rate / WINDOW_DIVISOR` samples (50 ms).
    const WINDOW_DIVISOR: f32 = 20.0;
    /// Longest window: 50 ms at 768 kHz.
    pub const MAX_WINDOW: usize = 38_400;

    /// Create a new DC blocker for the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let window = Self::window_for(sample_rate);
        Self {
            history: VecDeque::with_capacity(window + 1),
            total: 0.0,
            window,
        }
    }

    /// Process a single sample through the DC blocker.
    ///
    /// # Returns
    /// The input minus the mean of the current window (which includes the
    /// input itself). Non-finite input is taken as silence so it never
    /// enters the running sum.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input = if input.is_finite() { input } else { 0.0 };
        self.total += f64::from(input);
        self.history.push_back(input);

        if self.history.len() > self.window
            && let Some(oldest) = self.history.pop_front()
        {
            self.total -= f64::from(oldest);
        }

        let mean = self.total / self.history.len() as f64;
        (f64::from(input) - mean) as f32
    }

    /// Clear the sample history and running sum.
    pub fn reset(&mut self) {
        self.history.clear();
        self.total = 0.0;
    }

    /// Re-derive the window length for a new sample rate.
    ///
    /// Clears the history: samples captured at the old rate would skew the
    /// mean of the new window.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.window = Self::window_for(sample_rate);
        self.reset();
        let wanted = self.window + 1;
        if self.history.capacity() < wanted {
            self.history.reserve(wanted);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, window = self.window, "dc blocker window");
    }

    /// Maximum number of samples averaged.
    pub fn window_len(&self) -> usize {
        self.window
    }

    /// Number of samples currently held (grows to [`window_len`](Self::window_len)).
    pub fn filled(&self) -> usize {
        self.history.len()
    }

    /// Current mean of the window, or 0.0 when empty.
    pub fn mean(&self) -> f64 {
        if self.history.is_empty() {
            0.0
        } else {
            self.total / self.history.len() as f64
        }
    }

    fn window_for(sample_rate: f32) -> usize {
        if !sample_rate.is_finite() {
            return 1;
        }
        let window = libm::floorf(sample_rate / Self::WINDOW_DIVISOR);
        // `as` saturates: negative rates land on 0, then the floor of 1
        (window as usize).clamp(1, Self::MAX_WINDOW)
    }
}

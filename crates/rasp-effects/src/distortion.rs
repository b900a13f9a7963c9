//! Table-driven distortion effect.
//!
//! [`Distortion`] ties the pieces together: it owns the configuration,
//! rebuilds and publishes the transfer table when the configuration changes,
//! and runs either one master instance (offline, via [`Effect`]) or a set of
//! real-time instances, one per channel, that share the published table.
//!
//! ## Threading
//!
//! The table is published through a [`SharedTable`] (`ArcSwap`). Readers load
//! the current snapshot without locking; a reconfiguration swaps in a new
//! snapshot while readers that already hold the old one keep using it until
//! they let go. Instances share nothing mutable, so independent channels can
//! run on independent threads.

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};
use rasp_core::{Effect, ParamDescriptor, ParameterInfo};

use crate::instance::InstanceState;
use crate::params::DistortionParams;
use crate::table::ShaperTable;

/// Atomically swappable handle to the current transfer table.
///
/// Cloning the handle is cheap and every clone sees the same publications.
#[derive(Clone)]
pub struct SharedTable {
    inner: Arc<ArcSwap<ShaperTable>>,
}

impl SharedTable {
    /// Wrap an initial table.
    pub fn new(table: ShaperTable) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Wait-free borrow of the current table, for use inside a process call.
    #[inline]
    pub fn guard(&self) -> Guard<Arc<ShaperTable>> {
        self.inner.load()
    }

    /// Owned reference to the current table.
    pub fn load(&self) -> Arc<ShaperTable> {
        self.inner.load_full()
    }

    /// Replace the current table.
    pub fn publish(&self, table: ShaperTable) {
        self.inner.store(Arc::new(table));
    }
}

impl core::fmt::Debug for SharedTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let table = self.inner.load();
        f.debug_struct("SharedTable")
            .field("curve", &table.curve())
            .field("makeup_gain", &table.makeup_gain())
            .finish()
    }
}

/// Handle to a real-time instance, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub usize);

/// Waveshaping distortion with a shared lookup table.
///
/// ## Parameters
/// - `Distortion type`: curve family, 0 to 10 (default 0, hard clip)
/// - `DC blocking filter`: 0 or 1 (default 0)
/// - `Clipping level`: -100.0 to 0.0 dB (default -6.0)
/// - `Noise floor`: -80.0 to -20.0 dB (default -70.0)
/// - `Parameter 1`: 0 to 100% (default 50.0)
/// - `Parameter 2`: 0 to 100% (default 50.0)
/// - `Repeats`: 0 to 5 (default 1)
///
/// # Example
///
/// ```rust
/// use rasp_core::Effect;
/// use rasp_effects::{Curve, Distortion, DistortionParams};
///
/// let mut dist = Distortion::new(48000.0);
/// dist.set_params(DistortionParams::default().with_curve(Curve::SoftClip));
///
/// let input = [0.0, 0.25, 0.5, 1.0];
/// let mut output = [0.0; 4];
/// assert_eq!(dist.process_block(&input, &mut output), 4);
/// assert!(output.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug)]
pub struct Distortion {
    params: DistortionParams,
    table: SharedTable,
    master: InstanceState,
    realtime: Vec<InstanceState>,
    sample_rate: f32,
}

impl Distortion {
    /// Create a distortion with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_params(DistortionParams::default(), sample_rate)
    }

    /// Create a distortion with the given parameters.
    pub fn with_params(params: DistortionParams, sample_rate: f32) -> Self {
        let params = params.sanitized();
        Self {
            params,
            table: SharedTable::new(ShaperTable::build(&params)),
            master: InstanceState::new(&params, sample_rate),
            realtime: Vec::new(),
            sample_rate,
        }
    }

    /// Current (clamped) configuration.
    pub fn params(&self) -> &DistortionParams {
        &self.params
    }

    /// Replace the configuration.
    ///
    /// Values are clamped. The table is rebuilt and published only when the
    /// clamped configuration differs from the current one; returns whether
    /// that happened.
    pub fn set_params(&mut self, params: DistortionParams) -> bool {
        let params = params.sanitized();
        if params == self.params {
            return false;
        }
        self.params = params;
        let table = ShaperTable::build(&params);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            curve = ?params.curve,
            makeup_gain = table.makeup_gain(),
            repeats = params.repeats,
            "transfer table rebuilt"
        );

        self.table.publish(table);
        true
    }

    /// Handle to the published table, for processing on other threads.
    pub fn shared_table(&self) -> SharedTable {
        self.table.clone()
    }

    /// Current table snapshot.
    pub fn table(&self) -> Arc<ShaperTable> {
        self.table.load()
    }

    /// Sample rate of the master instance.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Prepare the master instance for a new offline stream.
    pub fn process_initialize(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.master.init(sample_rate);
    }

    /// Master instance state.
    pub fn master(&self) -> &InstanceState {
        &self.master
    }

    // ── Real-time instances ─────────────────────────────────────────────────

    /// Drop any real-time instances and start an empty set.
    pub fn realtime_initialize(&mut self) {
        self.realtime.clear();
    }

    /// Add one real-time instance running the current configuration.
    ///
    /// Each instance processes one mono stream; `num_channels` is what the
    /// host asked for and is only recorded in the log.
    pub fn realtime_add_processor(&mut self, num_channels: usize, sample_rate: f32) -> InstanceId {
        let mut state = InstanceState::new(&self.params, sample_rate);
        state.init(sample_rate);
        self.realtime.push(state);
        let id = InstanceId(self.realtime.len() - 1);

        #[cfg(feature = "tracing")]
        tracing::debug!(id = id.0, num_channels, sample_rate, "realtime instance added");
        #[cfg(not(feature = "tracing"))]
        let _ = num_channels;

        id
    }

    /// Process one block on real-time instance `id`.
    ///
    /// Returns the number of samples written, or 0 if `id` is unknown.
    ///
    /// # Panics
    /// Panics if `input.len() != output.len()`.
    pub fn realtime_process(&mut self, id: InstanceId, input: &[f32], output: &mut [f32]) -> usize {
        let Some(state) = self.realtime.get_mut(id.0) else {
            return 0;
        };
        let table = self.table.guard();
        state.process_block(&table, input, output)
    }

    /// Current table plus every real-time instance, for processing channels
    /// in parallel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasp_effects::Distortion;
    ///
    /// let mut dist = Distortion::new(48000.0);
    /// dist.realtime_initialize();
    /// dist.realtime_add_processor(1, 48000.0);
    /// dist.realtime_add_processor(1, 48000.0);
    ///
    /// let inputs = [vec![0.3f32; 256], vec![-0.3f32; 256]];
    /// let mut outputs = [vec![0.0f32; 256], vec![0.0f32; 256]];
    /// let (table, instances) = dist.realtime_instances_mut();
    /// std::thread::scope(|s| {
    ///     for ((state, input), output) in instances.iter_mut().zip(&inputs).zip(&mut outputs) {
    ///         let table = &table;
    ///         s.spawn(move || state.process_block(table, input, output));
    ///     }
    /// });
    /// assert!(outputs[0][0] > 0.0 && outputs[1][0] < 0.0);
    /// ```
    pub fn realtime_instances_mut(&mut self) -> (Arc<ShaperTable>, &mut [InstanceState]) {
        (self.table.load(), &mut self.realtime)
    }

    /// Number of live real-time instances.
    pub fn realtime_instance_count(&self) -> usize {
        self.realtime.len()
    }

    /// Discard all real-time instances. The configuration and table remain.
    pub fn realtime_finalize(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(instances = self.realtime.len(), "realtime instances finalized");

        self.realtime.clear();
    }
}

impl Default for Distortion {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Distortion {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let table = self.table.guard();
        self.master.process_sample(&table, input)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        let table = self.table.guard();
        self.master.process_block(&table, input, output)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.process_initialize(sample_rate);
    }

    fn reset(&mut self) {
        self.master.init(self.sample_rate);
    }
}

impl ParameterInfo for Distortion {
    fn param_count(&self) -> usize {
        self.params.param_count()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.params.param_info(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get_param(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let mut params = self.params;
        params.set(index, value);
        self.set_params(params);
    }
}

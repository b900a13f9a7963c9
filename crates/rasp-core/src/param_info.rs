//! Parameter introspection for discoverable effect parameters.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! let a host discover, display, clamp and set an effect's parameters by
//! index, without knowing the concrete effect type:
//!
//! - **Command-line hosts**: resolve `name=value` pairs to parameter indices
//! - **Host automation**: stable [`ParamId`]s survive parameter reordering
//! - **Validation**: every descriptor carries its valid range and default
//!
//! # Example
//!
//! ```rust
//! use rasp_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct SimpleGain {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for SimpleGain {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0)
//!                 .with_id(ParamId(100), "gain_level")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = value.clamp(-60.0, 12.0);
//!         }
//!     }
//! }
//!
//! let mut gain = SimpleGain { gain_db: 0.0 };
//! assert_eq!(gain.find_param_by_name("gain"), Some(0));
//! gain.set_param(0, 40.0);
//! assert_eq!(gain.get_param(0), 12.0);
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter: hosts
/// record automation and saved sessions against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// Use [`union`](Self::union) to combine.
///
/// # Example
///
/// ```rust
/// use rasp_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the effect instance. Use [`param_count`](Self::param_count) to determine
/// valid indices.
pub trait ParameterInfo {
    /// Returns the number of parameters this effect exposes.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index, or
    /// `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp to the descriptor range. Out-of-range indices
    /// are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against [`ParamDescriptor::name`],
    /// [`ParamDescriptor::short_name`] and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || (!desc.string_id.is_empty() && desc.string_id.eq_ignore_ascii_case(name))
            })
        })
    }

    /// Returns the stable [`ParamId`] for the parameter at the given index.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Linear scan, for setup paths rather than the audio callback.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// # Example
///
/// ```rust
/// use rasp_core::{ParamDescriptor, ParamId};
///
/// let threshold = ParamDescriptor::gain_db("Clipping Level", "Thresh", -100.0, 0.0, -6.0)
///     .with_id(ParamId(102), "threshold");
/// assert_eq!(threshold.clamp(3.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Clipping Level").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters (e.g., "Thresh").
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the effect is initialized.
    pub default: f32,

    /// Recommended step increment: small for continuous parameters, `1.0`
    /// for discrete ones.
    pub step: f32,

    /// Stable numeric ID for host automation. Default `ParamId(0)`.
    pub id: ParamId,

    /// Human-readable stable ID used on command lines and in logs.
    pub string_id: &'static str,

    /// Capability flags. Default [`ParamFlags::AUTOMATABLE`].
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Generic parameter with custom name, unit and range.
    pub fn custom(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Gain or level parameter in decibels.
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            step: 0.5,
            ..Self::custom(name, short_name, ParamUnit::Decibels, min, max, default)
        }
    }

    /// Percentage parameter (0–100%).
    pub fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            step: 1.0,
            ..Self::custom(name, short_name, ParamUnit::Percent, 0.0, 100.0, default)
        }
    }

    /// Discrete parameter taking integer values in `[min, max]`.
    pub fn stepped(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            step: 1.0,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            ..Self::custom(name, short_name, ParamUnit::None, min, max, default)
        }
    }

    /// On/off switch stored as 0.0 / 1.0.
    pub fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        Self::stepped(name, short_name, 0.0, 1.0, if default { 1.0 } else { 0.0 })
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// Call after a factory method.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Whether the parameter only takes integer steps.
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// Stepped parameters are also rounded to the nearest integer. NaN maps
    /// to the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasp_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0);
    /// assert_eq!(desc.clamp(0.0), 0.0);
    /// assert_eq!(desc.clamp(-100.0), -60.0);
    /// assert_eq!(desc.clamp(100.0), 12.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        };
        if self.is_stepped() {
            libm::roundf(clamped)
        } else {
            clamped
        }
    }

    /// Whether `value` lies inside `[min, max]` (NaN never does).
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - for threshold and floor levels.
    Decibels,

    /// Percentage (%) - for generic shape amounts.
    Percent,

    /// No unit - for counts, switches and selectors.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasp_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Percent => "%",
            ParamUnit::None => "",
        }
    }
}

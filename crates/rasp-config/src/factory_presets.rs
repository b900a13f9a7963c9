//! Factory presets bundled with the library.
//!
//! These are compiled in and always available. Each pairs a command-line id
//! with a display name and a complete configuration.
//!
//! The leveller presets count repeats from zero: the table already applies
//! one levelling pass, so "Light" runs a single pass and "Heaviest" five.

use rasp_effects::{Curve, DistortionParams, Interpolation};

/// A named, built-in configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactoryPreset {
    /// Command-line identifier (kebab-case).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// The configuration.
    pub params: DistortionParams,
}

#[allow(clippy::too_many_arguments)]
const fn preset(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    curve: Curve,
    dc_block: bool,
    threshold_db: f64,
    noise_floor_db: f64,
    param1: f64,
    param2: f64,
    repeats: u32,
) -> FactoryPreset {
    FactoryPreset {
        id,
        name,
        description,
        params: DistortionParams {
            curve,
            dc_block,
            threshold_db,
            noise_floor_db,
            param1,
            param2,
            repeats,
            interpolation: Interpolation::None,
        },
    }
}

static FACTORY_PRESETS: &[FactoryPreset] = &[
    preset(
        "hard-clip",
        "Hard clip -12dB, 80% make-up gain",
        "Flat-topped clipping with most of the lost level restored",
        Curve::HardClip, false, -12.0, -70.0, 0.0, 80.0, 0,
    ),
    preset(
        "soft-clip",
        "Soft clip -12dB, 80% make-up gain",
        "Rounded knee above the threshold with make-up gain",
        Curve::SoftClip, false, -12.0, -70.0, 50.0, 80.0, 0,
    ),
    preset(
        "fuzz-box",
        "Fuzz Box",
        "Very low, hard soft-clip threshold",
        Curve::SoftClip, false, -30.0, -70.0, 80.0, 80.0, 0,
    ),
    preset(
        "walkie-talkie",
        "Walkie-talkie",
        "Squashed to almost nothing and pushed back up",
        Curve::SoftClip, false, -50.0, -70.0, 60.0, 80.0, 0,
    ),
    preset(
        "blues-drive",
        "Blues drive sustain",
        "Gentle half-sine overdrive",
        Curve::HalfSinCurve, false, -6.0, -70.0, 30.0, 80.0, 0,
    ),
    preset(
        "light-crunch",
        "Light Crunch Overdrive",
        "Mild exponential compression",
        Curve::ExpCurve, false, -6.0, -70.0, 20.0, 80.0, 0,
    ),
    preset(
        "heavy-overdrive",
        "Heavy Overdrive",
        "Strong logarithmic compression",
        Curve::LogCurve, false, -6.0, -70.0, 90.0, 80.0, 0,
    ),
    preset(
        "third-harmonic",
        "3rd Harmonic (Perfect Fifth)",
        "Full cubic curve, odd harmonics only",
        Curve::Cubic, false, -6.0, -70.0, 100.0, 60.0, 0,
    ),
    preset(
        "valve-overdrive",
        "Valve Overdrive",
        "Asymmetric tube-style warmth, DC removed",
        Curve::EvenHarmonics, true, -6.0, -70.0, 30.0, 40.0, 0,
    ),
    preset(
        "second-harmonic",
        "2nd Harmonic (Octave)",
        "Even-harmonic octave effect, DC removed",
        Curve::EvenHarmonics, true, -6.0, -70.0, 50.0, 0.0, 0,
    ),
    preset(
        "gated-expansion",
        "Gated Expansion Distortion",
        "Sine curve that expands quiet passages and compresses loud ones",
        Curve::SinCurve, false, -6.0, -70.0, 30.0, 80.0, 0,
    ),
    preset(
        "leveller-light",
        "Leveller, Light, -70dB noise floor",
        "One levelling pass",
        Curve::Leveller, false, -6.0, -70.0, 0.0, 50.0, 0,
    ),
    preset(
        "leveller-moderate",
        "Leveller, Moderate, -70dB noise floor",
        "Two levelling passes",
        Curve::Leveller, false, -6.0, -70.0, 0.0, 50.0, 1,
    ),
    preset(
        "leveller-heavy",
        "Leveller, Heavy, -70dB noise floor",
        "Three levelling passes",
        Curve::Leveller, false, -6.0, -70.0, 0.0, 50.0, 2,
    ),
    preset(
        "leveller-heavier",
        "Leveller, Heavier, -70dB noise floor",
        "Four levelling passes",
        Curve::Leveller, false, -6.0, -70.0, 0.0, 50.0, 3,
    ),
    preset(
        "leveller-heaviest",
        "Leveller, Heaviest, -70dB noise floor",
        "Five levelling passes",
        Curve::Leveller, false, -6.0, -70.0, 0.0, 50.0, 4,
    ),
    preset(
        "half-wave-rectifier",
        "Half-wave Rectifier",
        "Negative half-cycles removed",
        Curve::Rectifier, false, -6.0, -70.0, 50.0, 50.0, 0,
    ),
    preset(
        "full-wave-rectifier",
        "Full-wave Rectifier",
        "Negative half-cycles flipped",
        Curve::Rectifier, false, -6.0, -70.0, 100.0, 50.0, 0,
    ),
    preset(
        "full-wave-rectifier-dc",
        "Full-wave Rectifier (DC blocked)",
        "Negative half-cycles flipped, DC removed",
        Curve::Rectifier, true, -6.0, -70.0, 100.0, 50.0, 0,
    ),
    preset(
        "percussion-limiter",
        "Percussion Limiter",
        "Hard limit at -12 dB with 30% of the dry signal blended back",
        Curve::HardLimiter, false, -12.0, -70.0, 100.0, 30.0, 0,
    ),
];

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use rasp_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{:<24} {}", preset.id, preset.name);
/// }
/// assert_eq!(factory_presets().len(), 20);
/// ```
pub fn factory_presets() -> &'static [FactoryPreset] {
    FACTORY_PRESETS
}

/// Get a factory preset by id or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use rasp_config::get_factory_preset;
///
/// let fuzz = get_factory_preset("fuzz-box").unwrap();
/// assert_eq!(get_factory_preset("FUZZ BOX"), Some(fuzz));
/// assert!(get_factory_preset("nonexistent").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<&'static FactoryPreset> {
    let name = name.trim();
    FACTORY_PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(name) || p.name.eq_ignore_ascii_case(name))
}

/// Ids of all factory presets, in listing order.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS.iter().map(|p| p.id).collect()
}

/// Whether `name` matches a factory preset id or display name.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

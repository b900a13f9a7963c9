//! Transfer-curve families.
//!
//! A [`Curve`] picks the family of transfer function the lookup table is
//! built from. Indices are stable (0..=10) because presets and command lines
//! refer to curves by number as well as by name.

use core::fmt;
use core::str::FromStr;

/// Error returned when a curve name or index is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown curve '{0}'")]
pub struct ParseCurveError(pub String);

/// Waveshaping curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Curve {
    /// Linear up to the threshold, flat beyond it
    #[default]
    HardClip,
    /// Linear up to the threshold, logarithmic knee beyond it
    SoftClip,
    /// Iterated half-sine: gentle overdrive
    HalfSinCurve,
    /// Exponential compression: medium overdrive
    ExpCurve,
    /// Logarithmic compression: hard overdrive
    LogCurve,
    /// Odd-harmonic cubic polynomial
    Cubic,
    /// Asymmetric tanh blend producing even harmonics
    EvenHarmonics,
    /// Iterated full sine: expand low levels, compress high ones
    SinCurve,
    /// Piecewise gain stages that pull levels toward the middle
    Leveller,
    /// Half-wave to full-wave rectification
    Rectifier,
    /// Hard clip blended with the dry signal
    HardLimiter,
}

impl Curve {
    /// Every curve, in index order.
    pub const ALL: [Curve; 11] = [
        Curve::HardClip,
        Curve::SoftClip,
        Curve::HalfSinCurve,
        Curve::ExpCurve,
        Curve::LogCurve,
        Curve::Cubic,
        Curve::EvenHarmonics,
        Curve::SinCurve,
        Curve::Leveller,
        Curve::Rectifier,
        Curve::HardLimiter,
    ];

    /// Stable numeric index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Curve for a numeric index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Command-line identifier (kebab-case).
    pub fn id(self) -> &'static str {
        match self {
            Curve::HardClip => "hard-clip",
            Curve::SoftClip => "soft-clip",
            Curve::HalfSinCurve => "half-sin",
            Curve::ExpCurve => "exp",
            Curve::LogCurve => "log",
            Curve::Cubic => "cubic",
            Curve::EvenHarmonics => "even-harmonics",
            Curve::SinCurve => "sin",
            Curve::Leveller => "leveller",
            Curve::Rectifier => "rectifier",
            Curve::HardLimiter => "hard-limiter",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Curve::HardClip => "Hard Clipping",
            Curve::SoftClip => "Soft Clipping",
            Curve::HalfSinCurve => "Soft Overdrive",
            Curve::ExpCurve => "Medium Overdrive",
            Curve::LogCurve => "Hard Overdrive",
            Curve::Cubic => "Cubic Curve (odd harmonics)",
            Curve::EvenHarmonics => "Even Harmonics",
            Curve::SinCurve => "Expand and Compress",
            Curve::Leveller => "Leveller",
            Curve::Rectifier => "Rectifier Distortion",
            Curve::HardLimiter => "Hard Limiter 1413",
        }
    }

    /// Whether the table is built for `x >= 0` and mirrored as an odd function.
    ///
    /// Even harmonics, the rectifier and the limiter are computed across the
    /// whole input range instead.
    pub fn is_symmetric(self) -> bool {
        !matches!(
            self,
            Curve::EvenHarmonics | Curve::Rectifier | Curve::HardLimiter
        )
    }

    /// Whether the threshold parameter shapes this curve.
    pub fn uses_threshold(self) -> bool {
        matches!(
            self,
            Curve::HardClip | Curve::SoftClip | Curve::HardLimiter
        )
    }

    /// Whether the noise floor parameter shapes this curve.
    pub fn uses_noise_floor(self) -> bool {
        self == Curve::Leveller
    }

    /// What parameter 1 means for this curve.
    pub fn param1_label(self) -> &'static str {
        match self {
            Curve::HardClip => "Drive",
            Curve::SoftClip => "Hardness",
            Curve::Leveller => "Levelling fine adjustment",
            Curve::HardLimiter => "Wet level",
            _ => "Distortion amount",
        }
    }

    /// What parameter 2 means for this curve, if it is used.
    pub fn param2_label(self) -> Option<&'static str> {
        match self {
            Curve::HardClip | Curve::SoftClip => Some("Make-up gain"),
            Curve::HalfSinCurve
            | Curve::ExpCurve
            | Curve::LogCurve
            | Curve::Cubic
            | Curve::SinCurve => Some("Output level"),
            Curve::EvenHarmonics => Some("Harmonic brightness"),
            Curve::HardLimiter => Some("Residual level"),
            Curve::Leveller | Curve::Rectifier => None,
        }
    }

    /// What the repeat count means for this curve.
    ///
    /// Repeats apply to every curve; the leveller and cubic curves are the
    /// ones built to be run more than once.
    pub fn repeats_label(self) -> &'static str {
        match self {
            Curve::Leveller => "Degree of levelling",
            _ => "Repeat processing",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = ParseCurveError;

    /// Accepts the kebab-case id, the display name (any case) or the index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| ParseCurveError(s.to_string()));
        }
        let normalized = trimmed.replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|c| {
                c.id().eq_ignore_ascii_case(&normalized) || c.name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ParseCurveError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_stable() {
        for (i, curve) in Curve::ALL.iter().enumerate() {
            assert_eq!(curve.index(), i);
            assert_eq!(Curve::from_index(i), Some(*curve));
        }
        assert_eq!(Curve::Rectifier.index(), 9);
        assert_eq!(Curve::from_index(11), None);
    }

    #[test]
    fn test_parse_by_id_name_and_index() {
        assert_eq!("hard-clip".parse::<Curve>(), Ok(Curve::HardClip));
        assert_eq!("EVEN_HARMONICS".parse::<Curve>(), Ok(Curve::EvenHarmonics));
        assert_eq!("Soft Overdrive".parse::<Curve>(), Ok(Curve::HalfSinCurve));
        assert_eq!("10".parse::<Curve>(), Ok(Curve::HardLimiter));
        assert_eq!(" leveller ".parse::<Curve>(), Ok(Curve::Leveller));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "fuzz".parse::<Curve>().unwrap_err();
        assert_eq!(err.to_string(), "unknown curve 'fuzz'");
        assert!("11".parse::<Curve>().is_err());
    }

    #[test]
    fn test_symmetry_classification() {
        let full_range: Vec<_> = Curve::ALL
            .iter()
            .filter(|c| !c.is_symmetric())
            .copied()
            .collect();
        assert_eq!(
            full_range,
            [Curve::EvenHarmonics, Curve::Rectifier, Curve::HardLimiter]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        for a in Curve::ALL {
            for b in Curve::ALL {
                if a != b {
                    assert_ne!(a.id(), b.id());
                }
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Curve::HardLimiter.param2_label(), Some("Residual level"));
        assert_eq!(Curve::Rectifier.param2_label(), None);
        assert_eq!(Curve::Leveller.repeats_label(), "Degree of levelling");
        assert!(Curve::Leveller.uses_noise_floor());
        assert!(!Curve::Cubic.uses_threshold());
    }
}

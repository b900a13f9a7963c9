//! Parsing `key=value` parameter settings.
//!
//! Keys resolve through [`ParameterInfo::find_param_by_name`], so a setting
//! may name a parameter by its string id (`threshold`), short name
//! (`Thresh`) or full name. Values are read in the parameter's own units:
//!
//! - Numbers: `"-12"`, `"37.5"`
//! - Decibel suffix on level parameters: `"-12dB"`, `"-70 db"`
//! - Percent suffix on amount parameters: `"80%"`
//! - Switches: `on`/`off`, `true`/`false`, `yes`/`no`, `1`/`0`
//! - Curves: an index, an id such as `soft-clip`, or a display name

use rasp_core::{ParamDescriptor, ParamUnit, ParameterInfo};
use rasp_effects::params::param;
use rasp_effects::{Curve, DistortionParams};

use crate::ConfigError;

/// Outcome of applying one setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    /// Parameter index.
    pub index: usize,
    /// Stable string id of the parameter.
    pub name: &'static str,
    /// Value as parsed, before clamping.
    pub requested: f32,
    /// Value actually stored.
    pub value: f32,
}

impl ParamChange {
    /// Whether the requested value had to be clamped into range.
    pub fn was_clamped(&self) -> bool {
        self.requested != self.value
    }
}

/// Split a `key=value` setting.
///
/// # Example
///
/// ```rust
/// use rasp_config::parse_assignment;
///
/// assert_eq!(parse_assignment(" repeats = 3 ").unwrap(), ("repeats", "3"));
/// assert!(parse_assignment("repeats").is_err());
/// ```
pub fn parse_assignment(setting: &str) -> Result<(&str, &str), ConfigError> {
    let (key, value) = setting
        .split_once('=')
        .ok_or_else(|| ConfigError::MalformedAssignment(setting.to_string()))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(ConfigError::MalformedAssignment(setting.to_string()));
    }
    Ok((key, value))
}

/// Parse a raw value for the parameter described by `desc`.
///
/// Returns `None` if the text cannot be read in that parameter's units.
/// Non-finite numbers are rejected.
pub fn parse_param_value(desc: &ParamDescriptor, raw: &str) -> Option<f32> {
    let raw = raw.trim();

    if desc.string_id == "curve" {
        return raw.parse::<Curve>().ok().map(|c| c.index() as f32);
    }

    if desc.is_stepped() && desc.min == 0.0 && desc.max == 1.0 {
        match raw.to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => return Some(1.0),
            "off" | "false" | "no" | "0" => return Some(0.0),
            _ => return None,
        }
    }

    let number = match desc.unit {
        ParamUnit::Decibels => raw
            .strip_suffix("dB")
            .or_else(|| raw.strip_suffix("db"))
            .unwrap_or(raw),
        ParamUnit::Percent => raw.strip_suffix('%').unwrap_or(raw),
        ParamUnit::None => raw,
    };
    let value = number.trim().parse::<f32>().ok().filter(|v| v.is_finite())?;

    if desc.is_stepped() && value.fract() != 0.0 {
        return None;
    }
    Some(value)
}

/// Apply one setting to `params`, clamping it into the parameter's range.
///
/// # Example
///
/// ```rust
/// use rasp_config::apply_param;
/// use rasp_effects::{Curve, DistortionParams};
///
/// let mut params = DistortionParams::default();
/// apply_param(&mut params, "curve", "rectifier").unwrap();
/// let change = apply_param(&mut params, "param1", "150%").unwrap();
///
/// assert_eq!(params.curve, Curve::Rectifier);
/// assert_eq!(params.param1, 100.0);
/// assert!(change.was_clamped());
/// ```
pub fn apply_param(
    params: &mut DistortionParams,
    key: &str,
    raw: &str,
) -> Result<ParamChange, ConfigError> {
    let index = params
        .find_param_by_name(key)
        .ok_or_else(|| ConfigError::UnknownParameter(key.to_string()))?;
    let desc = params
        .param_info(index)
        .ok_or_else(|| ConfigError::UnknownParameter(key.to_string()))?;

    let requested = if index == param::CURVE {
        raw.parse::<Curve>()?.index() as f32
    } else {
        parse_param_value(&desc, raw)
            .ok_or_else(|| ConfigError::invalid_value(desc.string_id, raw, expected(&desc)))?
    };

    params.set_param(index, requested);
    Ok(ParamChange {
        index,
        name: desc.string_id,
        requested,
        value: params.get_param(index),
    })
}

/// Apply a sequence of `key=value` settings in order.
///
/// Stops at the first setting that fails to parse. Later settings override
/// earlier ones.
pub fn apply_settings<'a, I>(
    params: &mut DistortionParams,
    settings: I,
) -> Result<Vec<ParamChange>, ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    settings
        .into_iter()
        .map(|setting| {
            let (key, value) = parse_assignment(setting)?;
            apply_param(params, key, value)
        })
        .collect()
}

fn expected(desc: &ParamDescriptor) -> String {
    if desc.is_stepped() && desc.min == 0.0 && desc.max == 1.0 {
        "expected on or off".to_string()
    } else if desc.is_stepped() {
        format!("expected a whole number in [{}, {}]", desc.min, desc.max)
    } else {
        format!(
            "expected a number in [{}, {}]{}",
            desc.min,
            desc.max,
            desc.unit.suffix()
        )
    }
}

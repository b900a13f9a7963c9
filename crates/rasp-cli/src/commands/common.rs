//! Options shared by commands that build a configuration.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use rasp_config::{
    ConfigError, ParamsSnapshot, apply_param, apply_settings, get_factory_preset, validate_params,
};
use rasp_effects::{DistortionParams, Interpolation};

/// Where a configuration comes from, then what overrides it.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Factory preset to start from (id or name)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// JSON settings file to start from
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    pub settings: Option<PathBuf>,

    /// Curve family (index, id or name)
    #[arg(short, long)]
    pub curve: Option<String>,

    /// Parameter override, repeatable (e.g. "threshold=-12dB")
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Interpolate between table entries
    #[arg(long)]
    pub interpolate: bool,

    /// Reject out-of-range values instead of clamping them
    #[arg(long)]
    pub strict: bool,
}

impl ParamArgs {
    /// Resolve into a configuration: base, then curve, then overrides.
    pub fn resolve(&self) -> anyhow::Result<DistortionParams> {
        let mut params = if let Some(name) = &self.preset {
            get_factory_preset(name)
                .ok_or_else(|| ConfigError::PresetNotFound(name.clone()))?
                .params
        } else if let Some(path) = &self.settings {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let snapshot: ParamsSnapshot = serde_json::from_str(&text)
                .with_context(|| format!("cannot parse {}", path.display()))?;
            let params = DistortionParams::try_from(&snapshot)?;
            if self.strict {
                validate_params(&params).map_err(ConfigError::from)?;
            }
            params
        } else {
            DistortionParams::default()
        };

        if let Some(curve) = &self.curve {
            apply_param(&mut params, "curve", curve)?;
        }

        let changes = apply_settings(&mut params, self.params.iter().map(String::as_str))?;
        for change in changes.iter().filter(|c| c.was_clamped()) {
            if self.strict {
                bail!(
                    "{} = {} is out of range (would clamp to {})",
                    change.name,
                    change.requested,
                    change.value
                );
            }
            tracing::warn!(
                param = change.name,
                requested = change.requested,
                value = change.value,
                "value clamped"
            );
        }

        if self.interpolate {
            params.interpolation = Interpolation::Linear;
        }

        Ok(params.sanitized())
    }
}

/// One-line summary of a configuration.
pub fn describe(params: &DistortionParams) -> String {
    let curve = params.curve;
    let mut parts = vec![format!("{} ({})", curve.name(), curve.id())];
    if curve.uses_threshold() {
        parts.push(format!("threshold {:.1} dB", params.threshold_db));
    }
    if curve.uses_noise_floor() {
        parts.push(format!("noise floor {:.1} dB", params.noise_floor_db));
    }
    parts.push(format!("{} {:.0}%", curve.param1_label(), params.param1));
    if let Some(label) = curve.param2_label() {
        parts.push(format!("{} {:.0}%", label, params.param2));
    }
    parts.push(format!("{} {}", curve.repeats_label(), params.repeats));
    if params.dc_block {
        parts.push("DC blocked".to_string());
    }
    if params.interpolation == Interpolation::Linear {
        parts.push("interpolated".to_string());
    }
    parts.join(", ")
}

use std::{fs, path::Path};

use driftgrid_core::{CellLegend, EffectSpec, HazardPolicy, RewardScheme};
use serde::{Deserialize, Serialize};

use crate::{MdpError, variants};

const DEFAULT_ENV_CONFIG_YAML: &str = include_str!("../config/env.default.yaml");

/// Everything needed to construct a model: map, effect, rewards and hazard policy.
///
/// The value is immutable once handed to `MdpModel::build`; tweaking rewards
/// means building a new config, not mutating a shared one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    #[serde(default)]
    pub name: String,
    pub map: Vec<String>,
    #[serde(default)]
    pub legend: CellLegend,
    #[serde(default)]
    pub effect: EffectSpec,
    pub rewards: RewardScheme,
    #[serde(default)]
    pub hazard_policy: HazardPolicy,
}

impl Default for EnvConfig {
    fn default() -> Self {
        variants::windy_cliff_walking()
    }
}

impl EnvConfig {
    /// Parse an environment config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MdpError> {
        let config: EnvConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an environment config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, MdpError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_ENV_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, MdpError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Serialize this config back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, MdpError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the scalar fields and the legend. Map shape and cell codes are
    /// checked when the grid is parsed at build time.
    pub fn validate(&self) -> Result<(), MdpError> {
        if self.map.is_empty() {
            return Err(MdpError::InvalidConfig(
                "map must contain at least one row".to_string(),
            ));
        }

        let RewardScheme { step, hazard, goal } = self.rewards;
        if !(step.is_finite() && hazard.is_finite() && goal.is_finite()) {
            return Err(MdpError::InvalidConfig(
                "rewards must be finite".to_string(),
            ));
        }

        self.legend.validate()?;

        let rows = self.map.len();
        match &self.effect {
            EffectSpec::Wind { prob, .. } | EffectSpec::Slip { prob } if prob.is_nan() => {
                Err(MdpError::InvalidConfig(
                    "effect probability must be a number".to_string(),
                ))
            }
            EffectSpec::Wind { classes, .. } if classes.iter().any(|c| c.columns.is_empty()) => {
                Err(MdpError::InvalidConfig(
                    "wind classes must list at least one column".to_string(),
                ))
            }
            EffectSpec::Wind { classes, .. } if classes.iter().any(|c| c.strength > rows) => {
                Err(MdpError::InvalidConfig(format!(
                    "wind strength must not exceed the map height of {rows} rows"
                )))
            }
            _ => Ok(()),
        }
    }
}

use driftgrid_core::{CellLegend, EffectSpec, HazardPolicy, RewardScheme, WindClass};
use rand::Rng;

use crate::{EnvConfig, MdpError, MdpModel};

#[derive(Debug, Clone, Default)]
/// Struct to assemble an `EnvConfig` step by step
pub struct ModelBuilder {
    name: String,
    map: Vec<String>,
    legend: CellLegend,
    effect: EffectSpec,
    rewards: Option<RewardScheme>,
    hazard_policy: HazardPolicy,
}

impl ModelBuilder {
    /// Create a new ModelBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Set the map rows, one string per row
    pub fn set_map<S: AsRef<str>>(&mut self, rows: &[S]) -> &mut Self {
        self.map = rows.iter().map(|row| row.as_ref().to_string()).collect();
        self
    }

    pub fn set_legend(&mut self, legend: CellLegend) -> &mut Self {
        self.legend = legend;
        self
    }

    /// Wind classes, each activated once with probability `prob`
    pub fn wind(&mut self, prob: f64, classes: Vec<WindClass>) -> &mut Self {
        self.effect = EffectSpec::Wind { prob, classes };
        self
    }

    /// Slip sideways with probability `prob`
    pub fn slip(&mut self, prob: f64) -> &mut Self {
        self.effect = EffectSpec::Slip { prob };
        self
    }

    pub fn no_effect(&mut self) -> &mut Self {
        self.effect = EffectSpec::None;
        self
    }

    pub fn set_rewards(&mut self, step: f64, hazard: f64, goal: f64) -> &mut Self {
        self.rewards = Some(RewardScheme::new(step, hazard, goal));
        self
    }

    pub fn set_hazard_policy(&mut self, policy: HazardPolicy) -> &mut Self {
        self.hazard_policy = policy;
        self
    }

    pub fn build_config(self) -> Result<EnvConfig, MdpError> {
        let rewards = self
            .rewards
            .ok_or_else(|| MdpError::InvalidConfig("rewards must be set".to_string()))?;
        let config = EnvConfig {
            name: self.name,
            map: self.map,
            legend: self.legend,
            effect: self.effect,
            rewards,
            hazard_policy: self.hazard_policy,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<MdpModel, MdpError> {
        let config = self.build_config()?;
        MdpModel::build(config, rng)
    }

    pub fn build_seeded(self, seed: u64) -> Result<MdpModel, MdpError> {
        let config = self.build_config()?;
        MdpModel::from_seed(config, seed)
    }
}

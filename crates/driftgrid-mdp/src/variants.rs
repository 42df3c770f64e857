//! Named preset environments.
//!
//! A plain name-to-config lookup. Callers that need different rewards or a
//! different map take a preset and edit the returned value.

use driftgrid_core::{CellLegend, EffectSpec, HazardPolicy, RewardScheme, cliff_wind_classes};

use crate::{EnvConfig, MdpError};

pub const CLIFF_REWARDS: RewardScheme = RewardScheme {
    step: -1.0,
    hazard: -100.0,
    goal: 100.0,
};

pub const LAKE_REWARDS: RewardScheme = RewardScheme {
    step: -0.1,
    hazard: -10.0,
    goal: 10.0,
};

/// Rewards of the classic lake: nothing but reaching the goal pays.
pub const LAKE_GOAL_ONLY_REWARDS: RewardScheme = RewardScheme {
    step: 0.0,
    hazard: 0.0,
    goal: 1.0,
};

/// Each of the intended and the two sideways moves gets a third.
pub const LAKE_SLIP_PROB: f64 = 2.0 / 3.0;

pub const CLIFF_WIND_PROB: f64 = 0.1;

pub const CLIFF_4X12: [&str; 4] = [
    "RRRRRRRRRRRR",
    "RRRRRRRRRRRR",
    "RRRRRRRRRRRR",
    "SCCCCCCCCCCG",
];

pub const LAKE_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

pub const LAKE_8X8: [&str; 8] = [
    "SFFFFFFF",
    "FFFFFFFF",
    "FFFHFFFF",
    "FFFFFHFF",
    "FFFHFFFF",
    "FHHFFFHF",
    "FHFFHFHF",
    "FFFHFFFG",
];

pub const VARIANT_NAMES: [&str; 6] = [
    "windy_cliff_walking",
    "cliff_walking",
    "frozen_lake_4x4",
    "frozen_lake_8x8",
    "frozen_lake_no_rewards_4x4",
    "frozen_lake_no_rewards_8x8",
];

/// Resolve a preset by name.
pub fn variant(name: &str) -> Result<EnvConfig, MdpError> {
    match name {
        "windy_cliff_walking" => Ok(windy_cliff_walking()),
        "cliff_walking" => Ok(cliff_walking()),
        "frozen_lake_4x4" => Ok(frozen_lake(name, &LAKE_4X4, LAKE_REWARDS)),
        "frozen_lake_8x8" => Ok(frozen_lake(name, &LAKE_8X8, LAKE_REWARDS)),
        "frozen_lake_no_rewards_4x4" => Ok(frozen_lake(name, &LAKE_4X4, LAKE_GOAL_ONLY_REWARDS)),
        "frozen_lake_no_rewards_8x8" => Ok(frozen_lake(name, &LAKE_8X8, LAKE_GOAL_ONLY_REWARDS)),
        _ => Err(MdpError::UnknownVariant {
            name: name.to_string(),
        }),
    }
}

/// 4x12 cliff with the two wind classes.
pub fn windy_cliff_walking() -> EnvConfig {
    EnvConfig {
        name: "windy_cliff_walking".to_string(),
        map: to_rows(&CLIFF_4X12),
        legend: CellLegend::default(),
        effect: EffectSpec::Wind {
            prob: CLIFF_WIND_PROB,
            classes: cliff_wind_classes(),
        },
        rewards: CLIFF_REWARDS,
        hazard_policy: HazardPolicy::ResetToStart,
    }
}

pub fn cliff_walking() -> EnvConfig {
    EnvConfig {
        name: "cliff_walking".to_string(),
        effect: EffectSpec::None,
        ..windy_cliff_walking()
    }
}

fn frozen_lake(name: &str, map: &[&str], rewards: RewardScheme) -> EnvConfig {
    EnvConfig {
        name: name.to_string(),
        map: to_rows(map),
        legend: CellLegend::default(),
        effect: EffectSpec::Slip {
            prob: LAKE_SLIP_PROB,
        },
        rewards,
        hazard_policy: HazardPolicy::Terminate,
    }
}

fn to_rows(map: &[&str]) -> Vec<String> {
    map.iter().map(|row| row.to_string()).collect()
}
